//! Typed REST client for the CRM lead-assignment API.
//!
//! Provides the response envelope, error normalisation, the rule
//! repository, assignment operations, lead/user listings, the backend
//! traits the workflows are written against, and a read-through cache.

pub mod assignments;
pub mod backend;
pub mod cache;
pub mod config;
pub mod directory;
pub mod envelope;
pub mod error;
pub mod http;
pub mod rules;

pub use backend::{AssignmentBackend, RuleStore};
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::CrmClient;
