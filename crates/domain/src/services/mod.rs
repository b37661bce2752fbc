//! Domain services for Feedback Desk.
//!
//! Services contain business logic that operates on domain models.

pub mod analytics;
pub mod feedback;
pub mod memory;
pub mod session;
pub mod store;

pub use feedback::FeedbackService;
pub use memory::{InMemoryCredentialStore, InMemoryFeedbackStore};
pub use session::{authenticate, AdminSession};
pub use store::{sort_newest_first, CredentialStore, FeedbackStore};
