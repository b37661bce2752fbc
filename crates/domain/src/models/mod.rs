//! Domain models for Feedback Desk.

pub mod admin;
pub mod analytics;
pub mod feedback;

pub use admin::{AdminRole, AdminUser, LoginRequest, LoginResponse, Principal, SessionResponse};
pub use analytics::{
    CountBucket, DashboardResponse, FeedbackAnalytics, FeedbackStats, PublicStats,
    RecentSubmission,
};
pub use feedback::{
    Category, CreateFeedbackRequest, Department, FeedbackFilter, FeedbackListQuery,
    FeedbackOptions, FeedbackStatus, FeedbackSubmission, FeedbackType, NewFeedback, Priority,
    UnknownChoice, UpdateFeedbackStatusRequest,
};
