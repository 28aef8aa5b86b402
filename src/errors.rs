use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

use crate::types::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Token issuance failures; rejected tokens are reported as `Unauthorized`.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<BlockingError> for AppError {
    fn from(err: BlockingError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_)
            | AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Hashing(_) => "Error processing password".to_string(),
            AppError::Token(_) => "Failed to create authentication token".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }

        HttpResponse::build(self.status_code()).json(ApiResponse {
            message,
            status: "error".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn internal_details_are_not_leaked() {
        let err = AppError::Database(DbErr::Custom("relation \"users\" does not exist".into()));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Database error occurred");
    }
}
