#![allow(dead_code)]

use actix_web::test::TestRequest;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;
use vacq_api::constants::config::AuthConfig;

pub const PASSWORD: &str = "hunter22";
// lowest cost bcrypt accepts
pub const TEST_BCRYPT_COST: u32 = 4;

/// Fresh in-memory database with the schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    // a single connection keeps the in-memory database alive and shared
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expire_hours: 1,
        cookie_expire_days: 1,
        cookie_secure: false,
        bcrypt_cost: TEST_BCRYPT_COST,
    }
}

pub fn register_request(username: &str, email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/auth/register").set_json(json!({
        "username": username,
        "email": email,
        "password": password,
    }))
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/auth/login").set_json(json!({
        "email": email,
        "password": password,
    }))
}

pub fn me_request(token: &str) -> TestRequest {
    TestRequest::get()
        .uri("/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
}
