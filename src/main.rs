use std::time::Duration;

use actix_web::{middleware::Logger, App, HttpServer};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use vacq_api::constants::config::{self, AuthConfig};
use vacq_api::middleware::cors::build_cors;
use vacq_api::routes::api::configure_app;
use vacq_api::utils::revocation::purge_expired_tokens;

const REVOCATION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url = config::get_database_url().map_err(|_| {
        std::io::Error::other("DATABASE_URL environment variable is required")
    })?;
    let auth_config = AuthConfig::from_env().map_err(std::io::Error::other)?;

    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .map_err(std::io::Error::other)?;
    log::info!("Database connected");

    Migrator::up(&db, None).await.map_err(std::io::Error::other)?;
    log::info!("Migrations applied");

    spawn_revocation_purge(db.clone());

    let server_address = config::get_server_address();
    let cors_origins = config::get_cors_origins();
    log::info!("Starting VacQ API at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(build_cors(&cors_origins))
            .configure(configure_app(db.clone(), auth_config.clone()))
    })
    .bind(&server_address)?
    .run()
    .await
}

fn spawn_revocation_purge(db: DatabaseConnection) {
    actix_rt::spawn(async move {
        let mut interval = tokio::time::interval(REVOCATION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match purge_expired_tokens(&db).await {
                Ok(0) => {}
                Ok(purged) => log::info!("Purged {} expired revoked tokens", purged),
                Err(e) => log::error!("Failed to purge revoked tokens: {}", e),
            }
        }
    });
}
