//! Domain layer for Feedback Desk.
//!
//! This crate contains:
//! - Domain models (FeedbackSubmission, AdminUser, analytics views)
//! - Storage traits and the feedback / session services built on them
//! - Domain error types

pub mod errors;
pub mod models;
pub mod services;
