use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse {
    pub message: String,
    pub status: String,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: "success".to_string(),
        }
    }
}
