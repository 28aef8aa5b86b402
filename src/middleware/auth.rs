use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use entity::users;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::rc::Rc;

use crate::constants::config::AuthConfig;
use crate::errors::AppError;
use crate::utils::auth::extract_token;
use crate::utils::jwt::{validate_jwt_token, Claims};
use crate::utils::revocation::is_token_revoked;

/// The user resolved by [`AuthMiddleware`], available to handlers as
/// `web::ReqData<AuthenticatedUser>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: users::Model,
    pub claims: Claims,
}

/// Rejects requests without a valid, unrevoked token for an active user.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(auth_user) => {
                    req.extensions_mut().insert(auth_user);
                    let res = svc.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("Rejected {} {}: {}", req.method(), req.path(), err);
                    let res = req.into_response(err.error_response());
                    Ok(res.map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or_else(|| AppError::Internal("auth config is not registered".to_string()))?;
    let db = req
        .app_data::<web::Data<DatabaseConnection>>()
        .ok_or_else(|| AppError::Internal("database is not registered".to_string()))?;

    let token = extract_token(req.request()).ok_or_else(|| {
        AppError::Unauthorized("Not authorized to access this route".to_string())
    })?;

    let claims = validate_jwt_token(&token, config).map_err(|e| {
        log::debug!("Token validation failed: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    if is_token_revoked(db.get_ref(), &claims.jti).await? {
        return Err(AppError::Unauthorized("Token has been revoked".to_string()));
    }

    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    let user = users::Entity::find_by_id(user_id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("Account is deactivated".to_string()));
    }

    Ok(AuthenticatedUser { user, claims })
}
