//! Stateful assignment workflows built on the client backend traits.
//!
//! - [`bulk::BulkAssignment`]: select leads, pick a target, submit.
//! - [`workload::WorkloadView`]: team workload with load ratios.
//! - [`rule_editor::RuleEditor`]: validate-then-save rule authoring.

pub mod bulk;
pub mod error;
pub mod rule_editor;
pub mod workload;

pub use error::WorkflowError;
