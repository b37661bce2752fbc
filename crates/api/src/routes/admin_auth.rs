//! Admin login and session endpoints.

use axum::{extract::State, Json};
use domain::errors::AuthError;
use domain::models::{LoginRequest, LoginResponse, SessionResponse};
use domain::services::AdminSession;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentSession, JsonBody};
use crate::middleware::metrics::record_login_attempt;

/// Log in with username and password and receive a session token.
///
/// POST /api/v1/admin/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Empty or over-long credentials can never match a stored account.
    if request.validate().is_err() {
        record_login_attempt("failure");
        return Err(AuthError::InvalidCredentials.into());
    }

    let mut session = AdminSession::anonymous();
    let principal = match session
        .login(state.credentials.as_ref(), &request.username, &request.password)
        .await
    {
        Ok(principal) => principal.clone(),
        Err(e) => {
            record_login_attempt(match e {
                AuthError::Persistence(_) => "error",
                _ => "failure",
            });
            return Err(e.into());
        }
    };

    let issued = state.jwt.issue(
        &principal.admin_id.to_string(),
        &principal.username,
        principal.role.as_str(),
    )?;
    record_login_attempt("success");
    info!(admin_id = principal.admin_id, jti = %issued.jti, "Admin session issued");

    Ok(Json(LoginResponse {
        access_token: issued.token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
        principal,
    }))
}

/// Report whether the caller holds a valid admin session.
///
/// GET /api/v1/admin/session
pub async fn get_session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        logged_in: session.is_logged_in(),
        principal: session.principal().cloned(),
    })
}
