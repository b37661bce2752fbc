//! Feedback submission entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{FeedbackSubmission, UnknownChoice};
use sqlx::FromRow;

/// Database row mapping for the feedback_submissions table.
///
/// Choice columns are stored as their display labels.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackEntity {
    pub id: i64,
    pub student_id: String,
    pub student_name: String,
    pub email: String,
    pub department: String,
    pub course_code: Option<String>,
    pub feedback_type: String,
    pub category: String,
    pub priority: String,
    pub feedback_text: String,
    pub submission_date: DateTime<Utc>,
    pub status: String,
    pub admin_response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
}

impl TryFrom<FeedbackEntity> for FeedbackSubmission {
    type Error = UnknownChoice;

    fn try_from(entity: FeedbackEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            student_id: entity.student_id,
            student_name: entity.student_name,
            email: entity.email,
            department: entity.department.parse()?,
            course_code: entity.course_code,
            feedback_type: entity.feedback_type.parse()?,
            category: entity.category.parse()?,
            priority: entity.priority.parse()?,
            feedback_text: entity.feedback_text,
            submission_date: entity.submission_date,
            status: entity.status.parse()?,
            admin_response: entity.admin_response,
            response_date: entity.response_date,
        })
    }
}
