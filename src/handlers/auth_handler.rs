use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use bcrypt::{hash, verify};
use chrono::Utc;
use entity::users;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, SqlErr,
};

use crate::constants::config::AuthConfig;
use crate::errors::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::auth::{normalize_email, AuthResponse, LoginRequest, RegisterRequest};
use crate::types::response::ApiResponse;
use crate::types::user::{CurrentUserResponse, UserResponse, DEFAULT_ROLE};
use crate::utils::auth::{extract_token, removal_cookie, token_cookie};
use crate::utils::jwt::{create_jwt_token, validate_jwt_token};
use crate::utils::revocation::revoke_token;

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Invalid input data", body = ApiResponse)
    )
)]
pub async fn register(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AuthConfig>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner().normalized();
    req.validate()?;

    // Check if user already exists
    let existing_user = users::Entity::find()
        .filter(users::Column::Email.eq(&req.email))
        .one(db.get_ref())
        .await?;
    if existing_user.is_some() {
        return Err(AppError::BadRequest(
            "User with this email already exists".to_string(),
        ));
    }

    // Check if username is taken
    let existing_username = users::Entity::find()
        .filter(users::Column::Username.eq(&req.username))
        .one(db.get_ref())
        .await?;
    if existing_username.is_some() {
        return Err(AppError::BadRequest("Username is already taken".to_string()));
    }

    let cost = config.bcrypt_cost;
    let password = req.password.clone();
    let password_hash = web::block(move || hash(password, cost)).await??;

    let user = create_user(db.get_ref(), req.username, req.email, password_hash).await?;

    log::info!("Registered user {} ({})", user.id, user.username);

    token_response(
        StatusCode::CREATED,
        "User registered successfully",
        user,
        &config,
    )
}

/// Log in a user
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User logged in successfully", body = AuthResponse),
        (status = 400, description = "Missing email or password", body = ApiResponse),
        (status = 401, description = "Authentication failed", body = ApiResponse)
    )
)]
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AuthConfig>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate()?;
    let email = normalize_email(&req.email);

    let user = users::Entity::find()
        .filter(users::Column::Email.eq(&email))
        .one(db.get_ref())
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::Unauthorized("Account is deactivated".to_string()));
    }

    let password = req.into_inner().password;
    let password_hash = user.password_hash.clone();
    let is_valid = web::block(move || verify(password, &password_hash)).await??;
    if !is_valid {
        log::debug!("Failed login for user {}", user.id);
        return Err(invalid_credentials());
    }

    log::info!("User {} logged in", user.id);

    token_response(StatusCode::OK, "Login successful", user, &config)
}

/// Get the current user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user data retrieved successfully", body = CurrentUserResponse),
        (status = 401, description = "Not authenticated", body = ApiResponse)
    )
)]
pub async fn get_me(auth_user: web::ReqData<AuthenticatedUser>) -> HttpResponse {
    let AuthenticatedUser { user, .. } = auth_user.into_inner();

    HttpResponse::Ok().json(CurrentUserResponse {
        status: "success".to_string(),
        message: "User details retrieved successfully".to_string(),
        user: UserResponse::from(user),
    })
}

/// Log out the current user
#[utoipa::path(
    get,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "User logged out successfully", body = ApiResponse)
    )
)]
pub async fn logout(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AuthConfig>,
    req: HttpRequest,
) -> HttpResponse {
    if let Some(token) = extract_token(&req) {
        match validate_jwt_token(&token, &config) {
            Ok(claims) => {
                if let Some(user_id) = claims.user_id() {
                    match revoke_token(db.get_ref(), &claims, user_id).await {
                        Ok(true) => log::info!("User {} logged out", user_id),
                        Ok(false) => log::debug!("Logout for missing user {}", user_id),
                        // The cookie is cleared regardless.
                        Err(e) => log::error!("Failed to revoke token for user {}: {}", user_id, e),
                    }
                }
            }
            // Nothing to revoke; still clear the cookie.
            Err(e) => log::debug!("Logout with unusable token: {}", e),
        }
    }

    HttpResponse::Ok()
        .cookie(removal_cookie(&config))
        .json(ApiResponse::success("User logged out successfully"))
}

/// Inserts a new user. A unique-index violation (a concurrent registration
/// that slipped past the lookups) is reported like the lookups report it.
async fn create_user<C>(
    db: &C,
    username: String,
    email: String,
    password_hash: String,
) -> Result<users::Model, AppError>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();
    users::ActiveModel {
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(DEFAULT_ROLE.to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            AppError::BadRequest("User with this email already exists".to_string())
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("Username is already taken".to_string())
        }
        _ => AppError::Database(err),
    })
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".to_string())
}

fn token_response(
    status: StatusCode,
    message: &str,
    user: users::Model,
    config: &AuthConfig,
) -> Result<HttpResponse, AppError> {
    let token = create_jwt_token(&user.id.to_string(), config)?;

    Ok(HttpResponse::build(status)
        .cookie(token_cookie(&token, config))
        .json(AuthResponse {
            status: "success".to_string(),
            message: message.to_string(),
            token,
            user: UserResponse::from(user),
        }))
}
