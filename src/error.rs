use std::io;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use shared::api::response::ApiResponse;

use crate::storage::StorageError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Only one file may be uploaded")]
    TooManyFiles,

    #[error("Invalid upload payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("File not found")]
    NotFound,

    #[error("Failed to save file: {0}")]
    SaveFailed(#[source] StorageError),

    #[error("Failed to delete file: {0}")]
    DeleteFailed(#[source] StorageError),

    #[error("Failed to list files: {0}")]
    ListFailed(#[source] io::Error),
}

impl ApiError {
    fn message(&self) -> &'static str {
        match self {
            ApiError::MissingFile => "No file uploaded",
            ApiError::TooManyFiles => "Only one file may be uploaded",
            ApiError::InvalidPayload(_) => "Invalid upload payload",
            ApiError::InvalidFileName(_) => "Invalid file name",
            ApiError::NotFound => "File not found",
            ApiError::SaveFailed(_) => "Failed to save file",
            ApiError::DeleteFailed(_) => "Failed to delete file",
            ApiError::ListFailed(_) => "Failed to list files",
        }
    }

    fn details(&self) -> String {
        match self {
            ApiError::InvalidPayload(reason) => reason.clone(),
            ApiError::InvalidFileName(name) => format!("{:?} is not a plain file name", name),
            ApiError::ListFailed(err) => err.to_string(),
            // io details of save/delete stay in the logs
            _ => self.message().to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::TooManyFiles
            | ApiError::InvalidPayload(_)
            | ApiError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::SaveFailed(_) | ApiError::DeleteFailed(_) | ApiError::ListFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(ApiResponse::<()>::error(
            self.message(),
            status.as_u16(),
            self.details(),
        ))
    }
}
