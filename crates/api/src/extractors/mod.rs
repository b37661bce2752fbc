//! Custom Axum extractors.

pub mod admin_session;
pub mod json;
pub mod path;

pub use admin_session::{authenticate_token, AdminAuth, CurrentSession};
pub use json::JsonBody;
pub use path::{PathParam, QueryParams};
