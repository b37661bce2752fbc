//! Feedback repository for database operations.

use chrono::Utc;
use domain::errors::FeedbackError;
use domain::models::{FeedbackFilter, FeedbackStatus, FeedbackSubmission, NewFeedback};
use domain::services::FeedbackStore;
use sqlx::PgPool;
use tracing::error;

use crate::entities::FeedbackEntity;
use crate::metrics::{record_pool_metrics, QueryTimer};

const COLUMNS: &str = r#"
    id, student_id, student_name, email, department, course_code, feedback_type,
    category, priority, feedback_text, submission_date, status, admin_response,
    response_date
"#;

/// Repository for feedback submissions.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Creates a new FeedbackRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(query: &'static str) -> impl FnOnce(sqlx::Error) -> FeedbackError {
    move |e| {
        error!(query, error = %e, "Feedback query failed");
        FeedbackError::Persistence(e.to_string())
    }
}

fn into_domain(entity: FeedbackEntity) -> Result<FeedbackSubmission, FeedbackError> {
    let id = entity.id;
    FeedbackSubmission::try_from(entity).map_err(|e| {
        error!(feedback_id = id, error = %e, "Stored feedback row has an unknown label");
        FeedbackError::Persistence(format!("feedback {}: {}", id, e))
    })
}

fn into_domain_all(rows: Vec<FeedbackEntity>) -> Result<Vec<FeedbackSubmission>, FeedbackError> {
    rows.into_iter().map(into_domain).collect()
}

#[async_trait::async_trait]
impl FeedbackStore for FeedbackRepository {
    async fn create(&self, feedback: NewFeedback) -> Result<FeedbackSubmission, FeedbackError> {
        let timer = QueryTimer::new("insert_feedback");
        let row = sqlx::query_as::<_, FeedbackEntity>(&format!(
            r#"
            INSERT INTO feedback_submissions
                (student_id, student_name, email, department, course_code, feedback_type,
                 category, priority, feedback_text, submission_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&feedback.student_id)
        .bind(&feedback.student_name)
        .bind(&feedback.email)
        .bind(feedback.department.as_str())
        .bind(feedback.course_code.as_deref())
        .bind(feedback.feedback_type.as_str())
        .bind(feedback.category.as_str())
        .bind(feedback.priority.as_str())
        .bind(&feedback.feedback_text)
        .bind(Utc::now())
        .bind(FeedbackStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        into_domain(row.map_err(db_error("insert_feedback"))?)
    }

    async fn list(&self) -> Result<Vec<FeedbackSubmission>, FeedbackError> {
        let timer = QueryTimer::new("list_feedback");
        let rows = sqlx::query_as::<_, FeedbackEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM feedback_submissions
            ORDER BY submission_date DESC, id DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();

        into_domain_all(rows.map_err(db_error("list_feedback"))?)
    }

    async fn filter(
        &self,
        filter: FeedbackFilter,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackError> {
        let timer = QueryTimer::new("filter_feedback");
        let rows = sqlx::query_as::<_, FeedbackEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM feedback_submissions
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR priority = $2)
              AND ($3::text IS NULL OR category = $3)
            ORDER BY submission_date DESC, id DESC
            "#
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.priority.map(|p| p.as_str()))
        .bind(filter.category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await;
        timer.record();

        into_domain_all(rows.map_err(db_error("filter_feedback"))?)
    }

    async fn get(&self, id: i64) -> Result<FeedbackSubmission, FeedbackError> {
        let timer = QueryTimer::new("get_feedback");
        let row = sqlx::query_as::<_, FeedbackEntity>(&format!(
            "SELECT {COLUMNS} FROM feedback_submissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        match row.map_err(db_error("get_feedback"))? {
            Some(entity) => into_domain(entity),
            None => Err(FeedbackError::NotFound(id)),
        }
    }

    async fn update_status(
        &self,
        id: i64,
        status: FeedbackStatus,
        admin_response: Option<String>,
    ) -> Result<FeedbackSubmission, FeedbackError> {
        let timer = QueryTimer::new("update_feedback_status");
        let row = sqlx::query_as::<_, FeedbackEntity>(&format!(
            r#"
            UPDATE feedback_submissions
            SET status = $2, admin_response = $3, response_date = $4
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(admin_response.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        match row.map_err(db_error("update_feedback_status"))? {
            Some(entity) => into_domain(entity),
            None => Err(FeedbackError::NotFound(id)),
        }
    }

    async fn ping(&self) -> Result<(), FeedbackError> {
        record_pool_metrics(&self.pool);
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(db_error("ping"))
    }
}
