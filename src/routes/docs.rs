use actix_web::{web, HttpResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::auth_handler;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::get_me,
        auth_handler::logout,
    ),
    modifiers(&BearerAuth),
    tags((name = "auth", description = "Registration, login and session endpoints"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub fn configure_docs_routes() -> actix_web::Scope {
    web::scope("/api-docs").route("/openapi.json", web::get().to(openapi_json))
}
