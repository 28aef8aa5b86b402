pub mod auth_handler;
pub mod health;
