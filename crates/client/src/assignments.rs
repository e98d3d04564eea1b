//! Lead assignment operations and queries (`/assignments/*`).
//!
//! Each method is a single HTTP call. Failures are logged at the transport
//! boundary and returned unchanged; nothing is retried. Bulk operations are
//! atomic from the client's point of view: the whole call succeeds or the
//! whole call is reported as failed.

use serde::Serialize;

use leadflow_core::assignments::{
    AssignmentHistoryEntry, AutoAssignOutcome, BulkAssignSummary, BulkAutoAssignSummary,
    RedistributionSummary, UserRecommendation,
};
use leadflow_core::leads::Lead;
use leadflow_core::types::DbId;
use leadflow_core::workload::{AssignmentStats, WorkloadRecord};

use crate::envelope::Listing;
use crate::error::ClientError;
use crate::http::CrmClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignBody<'a> {
    assigned_to: DbId,
    reason: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkAssignBody<'a> {
    lead_ids: &'a [DbId],
    assigned_to: DbId,
    reason: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkAutoAssignBody<'a> {
    lead_ids: &'a [DbId],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReassignBody<'a> {
    new_assigned_to: DbId,
    reason: &'a str,
}

/// Filters for `GET /assignments/history`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Operations that change or report lead ownership.
#[derive(Clone)]
pub struct AssignmentOperations {
    http: CrmClient,
}

impl AssignmentOperations {
    pub fn new(http: CrmClient) -> Self {
        Self { http }
    }

    /// Assign one lead to a user.
    pub async fn assign_lead(
        &self,
        lead_id: DbId,
        assigned_to: DbId,
        reason: &str,
    ) -> Result<Lead, ClientError> {
        let path = format!("/assignments/leads/{lead_id}/assign");
        let body = AssignBody {
            assigned_to,
            reason,
        };
        self.http
            .fetch("assign_lead", self.http.post(&path).json(&body))
            .await
    }

    /// Assign many leads to one user in a single request.
    pub async fn bulk_assign_leads(
        &self,
        lead_ids: &[DbId],
        assigned_to: DbId,
        reason: &str,
    ) -> Result<BulkAssignSummary, ClientError> {
        let body = BulkAssignBody {
            lead_ids,
            assigned_to,
            reason,
        };
        tracing::info!(lead_count = lead_ids.len(), assigned_to, "Bulk assigning leads");
        self.http
            .fetch_or_default(
                "bulk_assign_leads",
                self.http.post("/assignments/leads/bulk-assign").json(&body),
            )
            .await
    }

    /// Let the server pick an owner for one lead.
    pub async fn auto_assign_lead(&self, lead_id: DbId) -> Result<AutoAssignOutcome, ClientError> {
        let path = format!("/assignments/leads/{lead_id}/auto-assign");
        self.http.fetch("auto_assign_lead", self.http.post(&path)).await
    }

    /// Let the server pick owners for many leads in one request.
    pub async fn process_bulk_auto_assignment(
        &self,
        lead_ids: &[DbId],
    ) -> Result<BulkAutoAssignSummary, ClientError> {
        let body = BulkAutoAssignBody { lead_ids };
        tracing::info!(lead_count = lead_ids.len(), "Bulk auto-assigning leads");
        self.http
            .fetch_or_default(
                "bulk_auto_assign",
                self.http
                    .post("/assignments/leads/bulk-auto-assign")
                    .json(&body),
            )
            .await
    }

    /// Move an assigned lead to a different user.
    pub async fn reassign_lead(
        &self,
        lead_id: DbId,
        new_assigned_to: DbId,
        reason: &str,
    ) -> Result<Lead, ClientError> {
        let path = format!("/assignments/leads/{lead_id}/reassign");
        let body = ReassignBody {
            new_assigned_to,
            reason,
        };
        self.http
            .fetch("reassign_lead", self.http.post(&path).json(&body))
            .await
    }

    pub async fn get_assignment_recommendations(
        &self,
        lead_id: DbId,
    ) -> Result<Vec<UserRecommendation>, ClientError> {
        let path = format!("/assignments/leads/{lead_id}/recommendations");
        let recs: Listing<UserRecommendation> = self
            .http
            .fetch("get_recommendations", self.http.get(&path))
            .await?;
        Ok(recs.into_vec())
    }

    /// Rebalance unassigned leads toward the least-loaded users.
    pub async fn redistribute_leads(&self) -> Result<RedistributionSummary, ClientError> {
        tracing::info!("Requesting workload redistribution");
        self.http
            .fetch_or_default(
                "redistribute_leads",
                self.http.post("/assignments/redistribute"),
            )
            .await
    }

    pub async fn get_team_workload(&self) -> Result<Vec<WorkloadRecord>, ClientError> {
        let rows: Listing<WorkloadRecord> = self
            .http
            .fetch("get_team_workload", self.http.get("/assignments/workload"))
            .await?;
        Ok(rows.into_vec())
    }

    pub async fn get_assignment_stats(&self) -> Result<AssignmentStats, ClientError> {
        self.http
            .fetch("get_assignment_stats", self.http.get("/assignments/stats"))
            .await
    }

    /// Routing statistics; the shape is server-defined and passed through.
    pub async fn get_routing_stats(&self) -> Result<serde_json::Value, ClientError> {
        self.http
            .fetch(
                "get_routing_stats",
                self.http.get("/assignments/routing-stats"),
            )
            .await
    }

    pub async fn get_assignment_history(
        &self,
        query: &HistoryQuery,
    ) -> Result<Vec<AssignmentHistoryEntry>, ClientError> {
        let rows: Listing<AssignmentHistoryEntry> = self
            .http
            .fetch(
                "get_assignment_history",
                self.http.get("/assignments/history").query(query),
            )
            .await?;
        Ok(rows.into_vec())
    }

    pub async fn get_lead_assignment_history(
        &self,
        lead_id: DbId,
    ) -> Result<Vec<AssignmentHistoryEntry>, ClientError> {
        let path = format!("/assignments/leads/{lead_id}/assignment-history");
        let rows: Listing<AssignmentHistoryEntry> = self
            .http
            .fetch("get_lead_assignment_history", self.http.get(&path))
            .await?;
        Ok(rows.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bulk_body_uses_camel_case() {
        let body = BulkAssignBody {
            lead_ids: &[1, 2],
            assigned_to: 9,
            reason: "coverage",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"leadIds": [1, 2], "assignedTo": 9, "reason": "coverage"})
        );
    }

    #[test]
    fn reassign_body_names_new_owner() {
        let body = ReassignBody {
            new_assigned_to: 4,
            reason: "",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"newAssignedTo": 4, "reason": ""})
        );
    }

    #[test]
    fn history_query_skips_unset_filters() {
        let q = HistoryQuery {
            lead_id: Some(3),
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"leadId": 3, "limit": 20})
        );
    }
}
