use actix_web::{
    cookie::{time::Duration, Cookie},
    http::header,
    HttpRequest,
};

use crate::constants::config::AuthConfig;

pub const TOKEN_COOKIE: &str = "token";

/// Reads the JWT from the `Authorization: Bearer` header, falling back to the
/// `token` cookie.
pub fn extract_token(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = from_header {
        return Some(token.to_string());
    }

    req.cookie(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty() && t != "none")
}

pub fn token_cookie(token: &str, config: &AuthConfig) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .max_age(Duration::days(config.cookie_expire_days))
        .finish()
}

pub fn removal_cookie(config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer from-header"))
            .cookie(Cookie::new(TOKEN_COOKIE, "from-cookie"))
            .to_http_request();

        assert_eq!(extract_token(&req).as_deref(), Some("from-header"));
    }

    #[test]
    fn falls_back_to_cookie() {
        let req = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, "from-cookie"))
            .to_http_request();

        assert_eq!(extract_token(&req).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn ignores_other_schemes_and_placeholders() {
        let basic = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(extract_token(&basic), None);

        let placeholder = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, "none"))
            .to_http_request();
        assert_eq!(extract_token(&placeholder), None);

        assert_eq!(extract_token(&TestRequest::default().to_http_request()), None);
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let config = AuthConfig {
            jwt_secret: "secret".to_string(),
            jwt_expire_hours: 1,
            cookie_expire_days: 1,
            cookie_secure: true,
            bcrypt_cost: 4,
        };
        let cookie = removal_cookie(&config);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.secure(), Some(true));
    }
}
