use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiErrorBody {
    pub code: u16,
    pub details: String,
}

/// Envelope wrapping every response body.
///
/// Only the constructors below build it, so `data` is set exactly when
/// `status` is `Success` and `error` exactly when it is `Error`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub status: ApiStatus,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            status: ApiStatus::Success,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, code: u16, details: impl Into<String>) -> Self {
        ApiResponse {
            status: ApiStatus::Error,
            message: message.into(),
            data: None,
            error: Some(ApiErrorBody {
                code,
                details: details.into(),
            }),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload; `data` serializes as `null`.
    pub fn empty(message: impl Into<String>) -> Self {
        ApiResponse {
            status: ApiStatus::Success,
            message: message.into(),
            data: None,
            error: None,
        }
    }
}
