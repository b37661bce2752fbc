//! Public feedback endpoints.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{CreateFeedbackRequest, FeedbackOptions, FeedbackSubmission, PublicStats};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::middleware::metrics::record_feedback_submitted;

/// Allowed values for the submission form's select boxes.
///
/// GET /api/v1/feedback/options
pub async fn get_options() -> Json<FeedbackOptions> {
    Json(FeedbackOptions::catalogue())
}

/// Submit feedback.
///
/// POST /api/v1/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackSubmission>), ApiError> {
    let created = state.feedback.submit(request).await?;
    record_feedback_submitted(created.priority.as_str());
    Ok((StatusCode::CREATED, Json(created)))
}

/// Headline figures for the welcome page.
///
/// GET /api/v1/stats
pub async fn get_public_stats(
    State(state): State<AppState>,
) -> Result<Json<PublicStats>, ApiError> {
    Ok(Json(state.feedback.public_stats().await?))
}
