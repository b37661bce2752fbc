//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod admin_user;
pub mod feedback;

pub use admin_user::AdminUserEntity;
pub use feedback::FeedbackEntity;
