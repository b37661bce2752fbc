//! In-memory store implementations for development and tests.

use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::RwLock;

use super::store::{sort_newest_first, CredentialStore, FeedbackStore};
use crate::errors::{AuthError, FeedbackError};
use crate::models::{
    AdminRole, AdminUser, FeedbackFilter, FeedbackStatus, FeedbackSubmission, NewFeedback,
};

fn poisoned<E>(_: E) -> FeedbackError {
    FeedbackError::Persistence("in-memory store lock poisoned".to_string())
}

/// Feedback store backed by a vector.
///
/// Can be switched offline to simulate storage failures.
#[derive(Debug)]
pub struct InMemoryFeedbackStore {
    rows: RwLock<Vec<FeedbackSubmission>>,
    next_id: AtomicI64,
    available: AtomicBool,
}

impl Default for InMemoryFeedbackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            available: AtomicBool::new(true),
        }
    }

    /// Makes every subsequent operation fail with a persistence error.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Inserts a fully formed record as-is. Used to seed fixtures with
    /// specific dates or statuses.
    pub fn insert_raw(&self, submission: FeedbackSubmission) -> Result<(), FeedbackError> {
        self.next_id.fetch_max(submission.id + 1, Ordering::SeqCst);
        self.rows.write().map_err(poisoned)?.push(submission);
        Ok(())
    }

    fn check_available(&self) -> Result<(), FeedbackError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(FeedbackError::Persistence(
                "feedback store unavailable".to_string(),
            ))
        }
    }

    fn snapshot(&self, filter: FeedbackFilter) -> Result<Vec<FeedbackSubmission>, FeedbackError> {
        self.check_available()?;
        let rows = self.rows.read().map_err(poisoned)?;
        let mut items: Vec<_> = rows.iter().filter(|s| filter.matches(s)).cloned().collect();
        sort_newest_first(&mut items);
        Ok(items)
    }
}

#[async_trait::async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn create(&self, feedback: NewFeedback) -> Result<FeedbackSubmission, FeedbackError> {
        self.check_available()?;
        let submission = FeedbackSubmission {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            student_id: feedback.student_id,
            student_name: feedback.student_name,
            email: feedback.email,
            department: feedback.department,
            course_code: feedback.course_code,
            feedback_type: feedback.feedback_type,
            category: feedback.category,
            priority: feedback.priority,
            feedback_text: feedback.feedback_text,
            submission_date: Utc::now(),
            status: FeedbackStatus::Pending,
            admin_response: None,
            response_date: None,
        };
        self.rows.write().map_err(poisoned)?.push(submission.clone());
        Ok(submission)
    }

    async fn list(&self) -> Result<Vec<FeedbackSubmission>, FeedbackError> {
        self.snapshot(FeedbackFilter::default())
    }

    async fn filter(
        &self,
        filter: FeedbackFilter,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackError> {
        self.snapshot(filter)
    }

    async fn get(&self, id: i64) -> Result<FeedbackSubmission, FeedbackError> {
        self.check_available()?;
        self.rows
            .read()
            .map_err(poisoned)?
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(FeedbackError::NotFound(id))
    }

    async fn update_status(
        &self,
        id: i64,
        status: FeedbackStatus,
        admin_response: Option<String>,
    ) -> Result<FeedbackSubmission, FeedbackError> {
        self.check_available()?;
        let mut rows = self.rows.write().map_err(poisoned)?;
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(FeedbackError::NotFound(id))?;
        row.status = status;
        row.admin_response = admin_response;
        row.response_date = Some(Utc::now());
        Ok(row.clone())
    }

    async fn ping(&self) -> Result<(), FeedbackError> {
        self.check_available()
    }
}

/// Credential store backed by a vector.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<Vec<AdminUser>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding one account, hashing `password` first.
    pub fn with_admin(username: &str, password: &str, role: AdminRole) -> Result<Self, AuthError> {
        let hash = shared::password::hash_password(password)
            .map_err(|e| AuthError::Persistence(e.to_string()))?;
        let store = Self::new();
        store.insert(username, &hash, role)?;
        Ok(store)
    }

    fn insert(
        &self,
        username: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<AdminUser, AuthError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::Persistence("credential store lock poisoned".to_string()))?;
        if users.iter().any(|u| u.username == username) {
            return Err(AuthError::Persistence(format!(
                "username {} already exists",
                username
            )));
        }
        let user = AdminUser {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AuthError> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::Persistence("credential store lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<AdminUser, AuthError> {
        self.insert(username, password_hash, role)
    }
}
