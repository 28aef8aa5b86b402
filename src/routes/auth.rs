use crate::handlers::auth_handler::{get_me, login, logout, register};
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)))
        // method guard runs before the middleware, so other verbs still get 405
        .service(web::resource("/me").route(web::get().to(get_me).wrap(AuthMiddleware)))
        .service(web::resource("/logout").route(web::get().to(logout)))
}
