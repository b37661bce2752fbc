//! Admin dashboard and analytics endpoints.

use axum::{extract::State, Json};
use domain::models::{DashboardResponse, FeedbackAnalytics};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;

/// Headline stats and the ten newest submissions.
///
/// GET /api/v1/admin/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> Result<Json<DashboardResponse>, ApiError> {
    Ok(Json(state.feedback.dashboard().await?))
}

/// Submission counts per category, priority, type, department and status.
///
/// GET /api/v1/admin/analytics
pub async fn get_analytics(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> Result<Json<FeedbackAnalytics>, ApiError> {
    Ok(Json(state.feedback.analytics().await?))
}
