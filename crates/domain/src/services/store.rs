//! Storage abstractions.
//!
//! The API layer talks to these traits only; Postgres and in-memory
//! implementations live in the persistence crate and [`super::memory`].

use crate::errors::{AuthError, FeedbackError};
use crate::models::{
    AdminRole, AdminUser, FeedbackFilter, FeedbackStatus, FeedbackSubmission, NewFeedback,
};

/// Durable storage of feedback submissions.
///
/// Every listing is ordered newest first: `submission_date` descending,
/// then `id` descending.
#[async_trait::async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persists a validated submission with status `Pending` and no response.
    async fn create(&self, feedback: NewFeedback) -> Result<FeedbackSubmission, FeedbackError>;

    /// Returns every submission.
    async fn list(&self) -> Result<Vec<FeedbackSubmission>, FeedbackError>;

    /// Returns the submissions matching all present criteria.
    async fn filter(&self, filter: FeedbackFilter)
        -> Result<Vec<FeedbackSubmission>, FeedbackError>;

    /// Fetches a single submission.
    async fn get(&self, id: i64) -> Result<FeedbackSubmission, FeedbackError>;

    /// Sets status and response and stamps `response_date` with the current time.
    ///
    /// Fails with [`FeedbackError::NotFound`] and changes nothing when `id`
    /// does not exist.
    async fn update_status(
        &self,
        id: i64,
        status: FeedbackStatus,
        admin_response: Option<String>,
    ) -> Result<FeedbackSubmission, FeedbackError>;

    /// Cheap connectivity probe used by readiness checks.
    async fn ping(&self) -> Result<(), FeedbackError>;
}

/// Storage of admin accounts.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AuthError>;

    /// Inserts an account. `password_hash` must already be an Argon2 hash.
    async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<AdminUser, AuthError>;
}

/// Sorts submissions newest first, breaking timestamp ties by descending id.
pub fn sort_newest_first(items: &mut [FeedbackSubmission]) {
    items.sort_by(|a, b| {
        b.submission_date
            .cmp(&a.submission_date)
            .then_with(|| b.id.cmp(&a.id))
    });
}
