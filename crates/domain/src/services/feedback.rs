//! Feedback intake and review workflow.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::analytics;
use super::store::FeedbackStore;
use crate::errors::{FeedbackError, FeedbackValidationError};
use crate::models::{
    CreateFeedbackRequest, DashboardResponse, FeedbackAnalytics, FeedbackFilter,
    FeedbackSubmission, NewFeedback, PublicStats, UpdateFeedbackStatusRequest,
};

/// Validates requests and forwards them to a [`FeedbackStore`].
#[derive(Clone)]
pub struct FeedbackService {
    store: Arc<dyn FeedbackStore>,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Validates a student's form and stores it as a new `Pending` submission.
    /// Nothing is written when validation fails.
    pub async fn submit(
        &self,
        request: CreateFeedbackRequest,
    ) -> Result<FeedbackSubmission, FeedbackError> {
        let feedback = NewFeedback::try_from(request)?;
        let created = self.store.create(feedback).await?;
        info!(
            feedback_id = created.id,
            student_id = %created.student_id,
            priority = %created.priority,
            category = %created.category,
            "Feedback submitted"
        );
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<FeedbackSubmission>, FeedbackError> {
        self.store.list().await
    }

    /// Lists submissions, skipping the filter query when no criterion is set.
    pub async fn filter(
        &self,
        filter: FeedbackFilter,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackError> {
        if filter.is_empty() {
            self.store.list().await
        } else {
            self.store.filter(filter).await
        }
    }

    pub async fn get(&self, id: i64) -> Result<FeedbackSubmission, FeedbackError> {
        self.store.get(id).await
    }

    /// Applies an admin's status change. A blank response is stored as absent.
    pub async fn respond(
        &self,
        id: i64,
        request: UpdateFeedbackStatusRequest,
    ) -> Result<FeedbackSubmission, FeedbackError> {
        request.validate().map_err(FeedbackValidationError::from)?;
        let response = shared::validation::non_blank(request.admin_response.as_deref());
        let updated = self
            .store
            .update_status(id, request.status, response)
            .await?;
        info!(
            feedback_id = id,
            status = %updated.status,
            has_response = updated.admin_response.is_some(),
            "Feedback status updated"
        );
        Ok(updated)
    }

    pub async fn dashboard(&self) -> Result<DashboardResponse, FeedbackError> {
        let items = self.store.list().await?;
        Ok(DashboardResponse {
            stats: analytics::summarize(&items, Utc::now()),
            recent: analytics::recent(&items),
        })
    }

    pub async fn public_stats(&self) -> Result<PublicStats, FeedbackError> {
        let items = self.store.list().await?;
        Ok(PublicStats::from(&analytics::summarize(&items, Utc::now())))
    }

    pub async fn analytics(&self) -> Result<FeedbackAnalytics, FeedbackError> {
        let items = self.store.list().await?;
        Ok(analytics::analyze(&items))
    }

    pub async fn ping(&self) -> Result<(), FeedbackError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackStatus, Priority};
    use crate::services::memory::InMemoryFeedbackStore;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn service() -> (FeedbackService, Arc<InMemoryFeedbackStore>) {
        let store = Arc::new(InMemoryFeedbackStore::new());
        (FeedbackService::new(store.clone()), store)
    }

    fn elevator_complaint() -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            student_id: "CU2023099".to_string(),
            student_name: "Tobi Adeyemi".to_string(),
            email: "tobi@caleb.edu.ng".to_string(),
            department: "Engineering".to_string(),
            course_code: None,
            feedback_type: "Complaint".to_string(),
            category: "Facilities".to_string(),
            priority: "Urgent".to_string(),
            feedback_text: "Broken elevator".to_string(),
        }
    }

    fn random_request(priority: &str) -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            student_id: format!("CU{}", (2020000u32..2026000).fake::<u32>()),
            student_name: Name().fake(),
            email: SafeEmail().fake(),
            department: "Law".to_string(),
            course_code: Some("LAW201".to_string()),
            feedback_type: "Suggestion".to_string(),
            category: "Academic".to_string(),
            priority: priority.to_string(),
            feedback_text: "More library hours please".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_and_review_flow() {
        let (service, _) = service();
        let created = service.submit(elevator_complaint()).await.unwrap();

        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].student_id, "CU2023099");
        assert_eq!(all[0].status, FeedbackStatus::Pending);
        assert!(all[0].admin_response.is_none());

        let updated = service
            .respond(
                created.id,
                UpdateFeedbackStatusRequest {
                    status: FeedbackStatus::InProgress,
                    admin_response: Some("Maintenance notified".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, FeedbackStatus::InProgress);
        assert_eq!(updated.admin_response.as_deref(), Some("Maintenance notified"));
        assert!(updated.response_date.is_some());
    }

    #[tokio::test]
    async fn test_invalid_submission_writes_nothing() {
        let (service, _) = service();
        let mut request = elevator_complaint();
        request.priority = "Select Priority".to_string();

        let err = service.submit(request).await.unwrap_err();
        assert!(matches!(
            err,
            FeedbackError::Validation(FeedbackValidationError::MissingField("priority"))
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_response_is_stored_as_none() {
        let (service, _) = service();
        let created = service.submit(elevator_complaint()).await.unwrap();
        let updated = service
            .respond(
                created.id,
                UpdateFeedbackStatusRequest {
                    status: FeedbackStatus::Completed,
                    admin_response: Some("   ".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(updated.admin_response.is_none());
        assert!(updated.response_date.is_some());
    }

    #[tokio::test]
    async fn test_overlong_response_is_rejected() {
        let (service, _) = service();
        let created = service.submit(elevator_complaint()).await.unwrap();
        let err = service
            .respond(
                created.id,
                UpdateFeedbackStatusRequest {
                    status: FeedbackStatus::Completed,
                    admin_response: Some("r".repeat(5001)),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FeedbackError::Validation(FeedbackValidationError::Invalid { ref field, .. })
                if field == "admin_response"
        ));

        let stored = service.get(created.id).await.unwrap();
        assert_eq!(stored.status, FeedbackStatus::Pending);
        assert!(stored.response_date.is_none());
    }

    #[tokio::test]
    async fn test_respond_to_unknown_id() {
        let (service, _) = service();
        let err = service
            .respond(
                42,
                UpdateFeedbackStatusRequest {
                    status: FeedbackStatus::Rejected,
                    admin_response: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FeedbackError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_filter_and_dashboard() {
        let (service, _) = service();
        service.submit(elevator_complaint()).await.unwrap();
        for _ in 0..3 {
            service.submit(random_request("Low")).await.unwrap();
        }

        let urgent = service
            .filter(FeedbackFilter {
                priority: Some(Priority::Urgent),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(urgent.len(), 1);

        let dashboard = service.dashboard().await.unwrap();
        assert_eq!(dashboard.stats.total, 4);
        assert_eq!(dashboard.stats.high_priority, 1);
        assert_eq!(dashboard.stats.this_week, 4);
        assert_eq!(dashboard.stats.departments, 2);
        assert_eq!(dashboard.recent.len(), 4);

        let public = service.public_stats().await.unwrap();
        assert_eq!(public.total, 4);
        assert_eq!(public.pending, 4);
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_swallowed() {
        let (service, store) = service();
        store.set_available(false);
        assert!(matches!(
            service.submit(elevator_complaint()).await,
            Err(FeedbackError::Persistence(_))
        ));
        assert!(service.dashboard().await.is_err());
    }
}
