use actix_multipart::{Multipart, MultipartError};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt as _;
use shared::api::{media::UploadFileResponse, response::ApiResponse};

use crate::{
    error::ApiError,
    naming,
    storage::{Storage, StorageError},
};

const FILE_FIELD: &str = "file";

/// Store the single `file` part of `payload` under a generated name.
///
/// On any failure nothing stays on disk, including a first file that was
/// already written when a second one shows up.
pub async fn upload_file(
    storage: &Storage,
    mut payload: Multipart,
) -> Result<UploadFileResponse, ApiError> {
    let mut stored = None;

    match receive_file(storage, &mut payload, &mut stored).await {
        Ok(()) => stored
            .map(|name| UploadFileResponse::for_stored_name(&name))
            .ok_or(ApiError::MissingFile),
        Err(err) => {
            if let Some(name) = stored {
                if let Err(cleanup_err) = storage.delete(&name).await {
                    tracing::warn!(stored_name = %name, error = %cleanup_err, "failed to discard rejected upload");
                }
            }

            Err(err)
        }
    }
}

async fn receive_file(
    storage: &Storage,
    payload: &mut Multipart,
    stored: &mut Option<String>,
) -> Result<(), ApiError> {
    while let Some(mut field) = payload.try_next().await.map_err(payload_error)? {
        let original = match (
            field.name(),
            field.content_disposition().and_then(|cd| cd.get_filename()),
        ) {
            // browsers send `filename=""` when no file was picked
            (Some(FILE_FIELD), Some(filename)) if !filename.is_empty() => {
                Some(filename.to_owned())
            }
            _ => None,
        };

        let Some(original) = original else {
            while field.try_next().await.map_err(payload_error)?.is_some() {}
            continue;
        };

        if stored.is_some() {
            return Err(ApiError::TooManyFiles);
        }

        let stored_name = naming::stored_name(&original);

        let bytes = storage
            .save(&stored_name, field)
            .await
            .map_err(|err| match err {
                StorageError::Interrupted(reason) => ApiError::InvalidPayload(reason),
                err => {
                    tracing::error!(stored_name = %stored_name, error = %err, "failed to save upload");
                    ApiError::SaveFailed(err)
                }
            })?;

        tracing::info!(stored_name = %stored_name, original = %original, bytes, "file stored");

        *stored = Some(stored_name);
    }

    Ok(())
}

fn payload_error(err: MultipartError) -> ApiError {
    match err {
        // not a multipart request at all, so there is no file in it either
        MultipartError::ContentTypeMissing | MultipartError::ContentTypeIncompatible => {
            ApiError::MissingFile
        }
        err => ApiError::InvalidPayload(err.to_string()),
    }
}

async fn upload(
    storage: web::Data<Storage>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let response = upload_file(&storage, payload).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("File uploaded successfully", response)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", web::post().to(upload));
}
