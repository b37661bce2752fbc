//! Persistence layer for Feedback Desk.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - Postgres implementations of the domain store traits

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
