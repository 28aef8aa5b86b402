use actix_web::{error::JsonPayloadError, web, HttpRequest};
use sea_orm::DatabaseConnection;

use crate::constants::config::AuthConfig;
use crate::errors::AppError;
use crate::handlers::health::{health_check, index};

pub fn configure_routes() -> actix_web::Scope {
    web::scope("")
        .app_data(json_config())
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .service(crate::routes::auth::configure_auth_routes())
        .service(crate::routes::docs::configure_docs_routes())
}

/// Registers shared state and every route on an `App`.
pub fn configure_app(
    db: DatabaseConnection,
    config: AuthConfig,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(db))
            .app_data(web::Data::new(config))
            .service(configure_routes());
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            AppError::BadRequest(format!("Invalid request body: {}", err)).into()
        })
}
