//! Admin review endpoints.

use axum::{extract::State, Json};
use domain::models::{
    FeedbackFilter, FeedbackListQuery, FeedbackSubmission, UpdateFeedbackStatusRequest,
};
use serde::Serialize;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminAuth, JsonBody, PathParam, QueryParams};
use crate::middleware::metrics::record_feedback_status_updated;

#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub total: usize,
    pub items: Vec<FeedbackSubmission>,
}

/// List submissions, newest first, optionally filtered by status, priority
/// and category. Each criterion accepts a label or "All".
///
/// GET /api/v1/admin/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    _admin: AdminAuth,
    QueryParams(query): QueryParams<FeedbackListQuery>,
) -> Result<Json<FeedbackListResponse>, ApiError> {
    let filter = FeedbackFilter::try_from(query)?;
    let items = state.feedback.filter(filter).await?;
    Ok(Json(FeedbackListResponse {
        total: items.len(),
        items,
    }))
}

/// GET /api/v1/admin/feedback/:id
pub async fn get_feedback(
    State(state): State<AppState>,
    _admin: AdminAuth,
    PathParam(id): PathParam<i64>,
) -> Result<Json<FeedbackSubmission>, ApiError> {
    Ok(Json(state.feedback.get(id).await?))
}

/// Set a submission's status and admin response.
///
/// PATCH /api/v1/admin/feedback/:id
pub async fn update_feedback(
    State(state): State<AppState>,
    admin: AdminAuth,
    PathParam(id): PathParam<i64>,
    JsonBody(request): JsonBody<UpdateFeedbackStatusRequest>,
) -> Result<Json<FeedbackSubmission>, ApiError> {
    let updated = state.feedback.respond(id, request).await?;
    record_feedback_status_updated(updated.status.as_str());
    info!(
        feedback_id = id,
        admin = %admin.principal.username,
        jti = %admin.jti,
        "Admin responded to feedback"
    );
    Ok(Json(updated))
}
