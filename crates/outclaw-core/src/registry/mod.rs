//! Remote skill registry.
//!
//! The registry service is an external collaborator; this module only
//! consumes its search, get-by-id and download endpoints.

pub mod client;
pub mod schema;

pub use client::RegistryClient;
pub use schema::{SearchOptions, SearchPage, SearchSort, SkillSummary};
