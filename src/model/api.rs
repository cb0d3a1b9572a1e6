use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// Always `"error"`.
    pub status: String,
    pub error: String,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
        }
    }
}

/// Body of acknowledgement responses that carry no resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    /// Always `"success"`.
    pub status: String,
    pub message: String,
}

impl StatusDto {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}
