use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{http, web};

pub mod files;
pub mod media;

pub fn config_wrapper(upload_dir: PathBuf) -> impl Fn(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.configure(media::config)
            .configure(files::config)
            .service(Files::new("/uploads", &upload_dir));
    }
}

pub fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(["GET", "POST", "DELETE"])
        .allowed_headers([http::header::CONTENT_TYPE])
        .max_age(3600)
}
