pub mod constants;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;
pub mod utils;
