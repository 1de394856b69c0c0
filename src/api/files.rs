use actix_web::{web, HttpResponse};
use shared::api::response::ApiResponse;

use crate::{
    error::ApiError,
    storage::{Storage, StorageError},
};

async fn list_files(storage: web::Data<Storage>) -> Result<HttpResponse, ApiError> {
    let names = storage.list().await.map_err(|err| {
        tracing::error!(error = %err, "failed to read upload directory");
        ApiError::ListFailed(err)
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Files retrieved successfully", names)))
}

async fn delete_file(
    storage: web::Data<Storage>,
    filename: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let filename = filename.into_inner();

    if storage.resolve(&filename).is_err() {
        tracing::warn!(filename = %filename, "rejected delete outside upload directory");
        return Err(ApiError::InvalidFileName(filename));
    }

    if !storage.exists(&filename).await {
        return Err(ApiError::NotFound);
    }

    match storage.delete(&filename).await {
        Ok(()) => {
            tracing::info!(stored_name = %filename, "file deleted");
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::empty("File deleted successfully")))
        }
        // lost a race with a concurrent delete
        Err(StorageError::NotFound(_)) => Err(ApiError::NotFound),
        Err(err) => {
            tracing::error!(stored_name = %filename, error = %err, "failed to delete file");
            Err(ApiError::DeleteFailed(err))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/files", web::get().to(list_files))
        .route("/delete/{filename}", web::delete().to(delete_file));
}
