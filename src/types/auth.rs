use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::types::user::UserResponse;

pub const MAX_USERNAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MIN_PASSWORD_LEN: usize = 6;
// bcrypt only looks at the first 72 bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.is_empty() {
            return Err(AppError::BadRequest("Username is required".to_string()));
        }
        if self.username.chars().count() > MAX_USERNAME_LEN {
            return Err(AppError::BadRequest(format!(
                "Username must be at most {} characters",
                MAX_USERNAME_LEN
            )));
        }
        if self.email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(&self.email) {
            return Err(AppError::BadRequest(
                "Please provide a valid email".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::BadRequest(format!(
                "Password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::BadRequest(
                "Please provide an email and password".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub status: String,
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
