use crate::types::response::ApiResponse;
use actix_web::{HttpResponse, Result};

pub async fn health_check() -> Result<HttpResponse> {
    let response = ApiResponse {
        message: "VacQ API is running".to_string(),
        status: "healthy".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}

pub async fn index() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success("Welcome to VacQ API")))
}
