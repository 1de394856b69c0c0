use actix_web::{
    middleware::{Compress, Logger},
    App, HttpServer,
};
use anyhow::Context;
use dotenv::dotenv;

use crate::{config::Config, storage::Storage};

mod api;
mod config;
mod error;
mod naming;
mod storage;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    tracing::info!("UPLOAD_DIR: {}", config.upload_dir.display());
    tracing::info!("HOST: {}", config.host);
    tracing::info!("PORT: {}", config.port);
    tracing::info!("CORS_ORIGIN: {}", config.allowed_origin);

    let storage = Storage::init(&config.upload_dir).await?;

    let addr = config.bind_address();
    let allowed_origin = config.allowed_origin.clone();
    let upload_dir = storage.root().to_path_buf();

    let http_fut = HttpServer::new(move || {
        App::new()
            .wrap(api::cors(&allowed_origin))
            .wrap(Compress::default())
            .wrap(Logger::default())
            .app_data(storage.clone())
            .configure(api::config_wrapper(upload_dir.clone()))
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run();

    tracing::info!("Server is running on http://{}", addr);

    http_fut.await?;

    Ok(())
}
