//! Shared utilities used across the Feedback Desk crates.
//!
//! - Password hashing with Argon2id
//! - Admin session tokens (JWT)
//! - Common field validation

pub mod jwt;
pub mod password;
pub mod validation;
