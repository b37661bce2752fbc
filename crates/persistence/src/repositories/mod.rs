//! Postgres implementations of the domain store traits.

pub mod admin_user;
pub mod feedback;

pub use admin_user::AdminUserRepository;
pub use feedback::FeedbackRepository;
