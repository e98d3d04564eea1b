//! Team workload read models and aggregation helpers.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Per-user lead counts and deal values from `GET /assignments/workload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRecord {
    pub user_id: DbId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub total_leads: u64,
    #[serde(default)]
    pub active_leads: u64,
    #[serde(default)]
    pub won_leads: u64,
    #[serde(default)]
    pub lost_leads: u64,
    #[serde(default)]
    pub total_deal_value: f64,
    #[serde(default)]
    pub avg_deal_value: f64,
}

/// Assignment counters from `GET /assignments/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentStats {
    pub total_leads: u64,
    pub assigned_leads: u64,
    pub unassigned_leads: u64,
    pub active_rules: u64,
    pub assignments_today: u64,
    pub assignments_this_week: u64,
    pub last_assignment_at: Option<Timestamp>,
}

/// A workload record with its share of the busiest user's load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadRow {
    pub record: WorkloadRecord,
    /// `total_leads / max(total_leads across users, 1)`, in `[0.0, 1.0]`.
    pub load_ratio: f64,
}

/// Team-wide sums across workload records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTotals {
    pub users: usize,
    pub total_leads: u64,
    pub active_leads: u64,
    pub won_leads: u64,
    pub lost_leads: u64,
    pub total_deal_value: f64,
}

/// Largest `total_leads` across users, floored at 1 so it can divide.
pub fn max_total_leads(records: &[WorkloadRecord]) -> u64 {
    records
        .iter()
        .map(|r| r.total_leads)
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Pair each record with its load ratio against the busiest user.
pub fn load_ratios(records: &[WorkloadRecord]) -> Vec<WorkloadRow> {
    let max = max_total_leads(records) as f64;
    records
        .iter()
        .map(|r| WorkloadRow {
            record: r.clone(),
            load_ratio: r.total_leads as f64 / max,
        })
        .collect()
}

pub fn team_totals(records: &[WorkloadRecord]) -> TeamTotals {
    records.iter().fold(
        TeamTotals {
            users: records.len(),
            ..Default::default()
        },
        |mut acc, r| {
            acc.total_leads += r.total_leads;
            acc.active_leads += r.active_leads;
            acc.won_leads += r.won_leads;
            acc.lost_leads += r.lost_leads;
            acc.total_deal_value += r.total_deal_value;
            acc
        },
    )
}
