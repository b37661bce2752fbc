//! Admin session extractors.
//!
//! Rebuild the caller's [`AdminSession`] from the `Authorization: Bearer`
//! session token issued at login.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use domain::errors::AuthError;
use domain::models::{AdminRole, Principal};
use domain::services::AdminSession;
use shared::jwt::{JwtConfig, JwtError, SessionClaims};

use crate::app::AppState;
use crate::error::ApiError;

/// Session of the caller, anonymous when no valid token is presented.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub AdminSession);

/// A logged-in admin. Rejects the request with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub principal: Principal,
    /// Token id, for correlating a session in logs.
    pub jti: String,
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(|token| Some(token.trim()))
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

fn principal_from_claims(claims: &SessionClaims) -> Result<Principal, JwtError> {
    let admin_id = claims.sub.parse().map_err(|_| JwtError::InvalidToken)?;
    let role: AdminRole = claims.role.parse().map_err(|_| JwtError::InvalidToken)?;
    Ok(Principal {
        admin_id,
        username: claims.username.clone(),
        role,
    })
}

/// Validates a session token and recovers the principal it was issued for.
pub fn authenticate_token(jwt: &JwtConfig, token: &str) -> Result<AdminAuth, ApiError> {
    let claims = jwt.validate(token)?;
    let principal = principal_from_claims(&claims)?;
    Ok(AdminAuth {
        principal,
        jti: claims.jti,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or(AuthError::Unauthenticated)?;
        let auth = authenticate_token(&state.jwt, token)?;
        Ok(auth)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = match bearer_token(parts) {
            Ok(Some(token)) => match authenticate_token(&state.jwt, token) {
                Ok(auth) => AdminSession::authenticated(auth.principal),
                Err(_) => AdminSession::anonymous(),
            },
            _ => AdminSession::anonymous(),
        };
        Ok(CurrentSession(session))
    }
}
