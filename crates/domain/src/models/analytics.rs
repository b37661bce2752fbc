//! Dashboard and analytics response models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::feedback::{Category, FeedbackStatus, FeedbackSubmission, FeedbackType, Priority};

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackStats {
    pub total: i64,
    pub pending: i64,
    pub high_priority: i64,
    pub this_week: i64,
    pub departments: i64,
}

/// Figures shown to anonymous visitors on the welcome page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PublicStats {
    pub total: i64,
    pub pending: i64,
    pub high_priority: i64,
    pub departments: i64,
}

impl From<&FeedbackStats> for PublicStats {
    fn from(stats: &FeedbackStats) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            high_priority: stats.high_priority,
            departments: stats.departments,
        }
    }
}

/// Row of the "recent submissions" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RecentSubmission {
    pub id: i64,
    pub student_id: String,
    pub feedback_type: FeedbackType,
    pub category: Category,
    pub priority: Priority,
    pub status: FeedbackStatus,
    pub submission_date: DateTime<Utc>,
}

impl From<&FeedbackSubmission> for RecentSubmission {
    fn from(s: &FeedbackSubmission) -> Self {
        Self {
            id: s.id,
            student_id: s.student_id.clone(),
            feedback_type: s.feedback_type,
            category: s.category,
            priority: s.priority,
            status: s.status,
            submission_date: s.submission_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardResponse {
    pub stats: FeedbackStats,
    pub recent: Vec<RecentSubmission>,
}

/// Number of submissions carrying one value of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountBucket {
    pub label: &'static str,
    pub count: i64,
}

/// Distribution of submissions across every categorical dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackAnalytics {
    pub total: i64,
    pub by_category: Vec<CountBucket>,
    pub by_priority: Vec<CountBucket>,
    pub by_type: Vec<CountBucket>,
    pub by_department: Vec<CountBucket>,
    pub by_status: Vec<CountBucket>,
}
