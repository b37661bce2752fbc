//! HTTP route handlers.

pub mod admin_auth;
pub mod admin_feedback;
pub mod dashboard;
pub mod feedback;
pub mod health;
