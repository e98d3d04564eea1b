//! Read models returned by the assignment operation endpoints.
//!
//! The server computes all of these; unknown or missing fields fall back
//! to defaults so older servers still decode.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// One row of lead assignment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentHistoryEntry {
    pub id: DbId,
    pub lead_id: DbId,
    #[serde(default)]
    pub assigned_from: Option<DbId>,
    #[serde(default)]
    pub assigned_to: Option<DbId>,
    #[serde(default)]
    pub assigned_by: Option<DbId>,
    #[serde(default)]
    pub assignment_type: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub rule_id: Option<DbId>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A suggested owner for a lead from `GET /assignments/leads/:id/recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecommendation {
    pub user_id: DbId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub current_workload: u64,
}

/// Result of auto-assigning a single lead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoAssignOutcome {
    pub lead_id: DbId,
    pub assigned_to: Option<DbId>,
    pub rule_id: Option<DbId>,
    pub assignment_type: Option<String>,
}

/// Summary of a bulk manual assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkAssignSummary {
    pub assigned_count: u64,
    pub lead_ids: Vec<DbId>,
}

/// Summary of a bulk auto-assignment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkAutoAssignSummary {
    pub processed: u64,
    pub assigned: u64,
    pub skipped: u64,
    pub results: Vec<AutoAssignOutcome>,
}

/// Summary of a workload redistribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedistributionSummary {
    pub redistributed: u64,
    pub users_affected: u64,
}
