use actix_cors::Cors;
use actix_web::http::header;

/// Credentialed CORS for the listed browser origins; the auth cookie needs
/// `supports_credentials`, which rules out a wildcard origin.
pub fn build_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
