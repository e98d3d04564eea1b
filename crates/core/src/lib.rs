//! Pure domain logic for lead assignment: rule catalogs, condition
//! validation, rule drafts, lead filtering and selection, and workload
//! aggregation. No I/O.

pub mod assignments;
pub mod catalog;
pub mod conditions;
pub mod error;
pub mod filters;
pub mod leads;
pub mod roles;
pub mod rules;
pub mod types;
pub mod workload;
