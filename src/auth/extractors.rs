use actix_web::dev::Payload;
use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::{AuthState, Claims, TokenKind};
use crate::error::AppError;

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Username of the caller, taken from the access token claims `AuthMiddleware`
/// stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims.sub.clone()))),
            None => {
                let err = AppError::Unauthorized(
                    "No authenticated user on request. Ensure AuthMiddleware is active.".into(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

/// Username proven by a valid refresh token in the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshIdentity(pub String);

impl FromRequest for RefreshIdentity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(refresh_identity(req).map_err(Into::into))
    }
}

fn refresh_identity(req: &HttpRequest) -> Result<RefreshIdentity, AppError> {
    let auth = req
        .app_data::<web::Data<AuthState>>()
        .ok_or_else(|| AppError::InternalServerError("Auth state not configured".into()))?;
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".into()))?;
    let claims = auth.tokens.verify(token, TokenKind::Refresh)?;
    Ok(RefreshIdentity(claims.sub))
}
