use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct UploadFileResponse {
    #[serde(rename = "fileUrl")]
    pub file_url: String,
}

impl UploadFileResponse {
    pub fn for_stored_name(stored_name: &str) -> Self {
        UploadFileResponse {
            file_url: format!("/uploads/{}", stored_name),
        }
    }
}
