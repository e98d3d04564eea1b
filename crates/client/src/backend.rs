//! Backend seams consumed by the assignment workflows.
//!
//! Workflows depend on these traits rather than on [`CrmClient`] directly
//! so they can run against an in-memory backend in tests, or behind the
//! read-through [`CachingBackend`](crate::cache::CachingBackend).

use std::sync::Arc;

use async_trait::async_trait;

use leadflow_core::assignments::{BulkAssignSummary, BulkAutoAssignSummary, RedistributionSummary};
use leadflow_core::leads::{Lead, User};
use leadflow_core::rules::{AssignmentRule, RuleDraft};
use leadflow_core::types::DbId;
use leadflow_core::workload::{AssignmentStats, WorkloadRecord};

use crate::directory::LeadQuery;
use crate::error::ClientError;
use crate::http::CrmClient;

/// Lead, user and assignment operations used by the bulk and workload
/// workflows.
#[async_trait]
pub trait AssignmentBackend: Send + Sync {
    async fn list_leads(&self) -> Result<Vec<Lead>, ClientError>;

    async fn list_users(&self) -> Result<Vec<User>, ClientError>;

    async fn bulk_assign_leads(
        &self,
        lead_ids: &[DbId],
        assigned_to: DbId,
        reason: &str,
    ) -> Result<BulkAssignSummary, ClientError>;

    async fn bulk_auto_assign(
        &self,
        lead_ids: &[DbId],
    ) -> Result<BulkAutoAssignSummary, ClientError>;

    async fn team_workload(&self) -> Result<Vec<WorkloadRecord>, ClientError>;

    async fn assignment_stats(&self) -> Result<AssignmentStats, ClientError>;

    async fn redistribute_leads(&self) -> Result<RedistributionSummary, ClientError>;
}

/// Rule persistence used by the rule editor.
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn list_rules(&self) -> Result<Vec<AssignmentRule>, ClientError>;

    async fn create_rule(&self, draft: &RuleDraft) -> Result<AssignmentRule, ClientError>;

    async fn update_rule(&self, id: DbId, draft: &RuleDraft)
        -> Result<AssignmentRule, ClientError>;

    async fn delete_rule(&self, id: DbId) -> Result<(), ClientError>;
}

#[async_trait]
impl AssignmentBackend for CrmClient {
    async fn list_leads(&self) -> Result<Vec<Lead>, ClientError> {
        self.directory().list_leads(&LeadQuery::default()).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.directory().list_users().await
    }

    async fn bulk_assign_leads(
        &self,
        lead_ids: &[DbId],
        assigned_to: DbId,
        reason: &str,
    ) -> Result<BulkAssignSummary, ClientError> {
        self.assignments()
            .bulk_assign_leads(lead_ids, assigned_to, reason)
            .await
    }

    async fn bulk_auto_assign(
        &self,
        lead_ids: &[DbId],
    ) -> Result<BulkAutoAssignSummary, ClientError> {
        self.assignments().process_bulk_auto_assignment(lead_ids).await
    }

    async fn team_workload(&self) -> Result<Vec<WorkloadRecord>, ClientError> {
        self.assignments().get_team_workload().await
    }

    async fn assignment_stats(&self) -> Result<AssignmentStats, ClientError> {
        self.assignments().get_assignment_stats().await
    }

    async fn redistribute_leads(&self) -> Result<RedistributionSummary, ClientError> {
        self.assignments().redistribute_leads().await
    }
}

#[async_trait]
impl RuleStore for CrmClient {
    async fn list_rules(&self) -> Result<Vec<AssignmentRule>, ClientError> {
        self.rules().list().await
    }

    async fn create_rule(&self, draft: &RuleDraft) -> Result<AssignmentRule, ClientError> {
        self.rules().create(draft).await
    }

    async fn update_rule(
        &self,
        id: DbId,
        draft: &RuleDraft,
    ) -> Result<AssignmentRule, ClientError> {
        self.rules().update(id, draft).await
    }

    async fn delete_rule(&self, id: DbId) -> Result<(), ClientError> {
        self.rules().delete(id).await
    }
}

#[async_trait]
impl<B: AssignmentBackend + ?Sized> AssignmentBackend for Arc<B> {
    async fn list_leads(&self) -> Result<Vec<Lead>, ClientError> {
        (**self).list_leads().await
    }

    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        (**self).list_users().await
    }

    async fn bulk_assign_leads(
        &self,
        lead_ids: &[DbId],
        assigned_to: DbId,
        reason: &str,
    ) -> Result<BulkAssignSummary, ClientError> {
        (**self).bulk_assign_leads(lead_ids, assigned_to, reason).await
    }

    async fn bulk_auto_assign(
        &self,
        lead_ids: &[DbId],
    ) -> Result<BulkAutoAssignSummary, ClientError> {
        (**self).bulk_auto_assign(lead_ids).await
    }

    async fn team_workload(&self) -> Result<Vec<WorkloadRecord>, ClientError> {
        (**self).team_workload().await
    }

    async fn assignment_stats(&self) -> Result<AssignmentStats, ClientError> {
        (**self).assignment_stats().await
    }

    async fn redistribute_leads(&self) -> Result<RedistributionSummary, ClientError> {
        (**self).redistribute_leads().await
    }
}

#[async_trait]
impl<S: RuleStore + ?Sized> RuleStore for Arc<S> {
    async fn list_rules(&self) -> Result<Vec<AssignmentRule>, ClientError> {
        (**self).list_rules().await
    }

    async fn create_rule(&self, draft: &RuleDraft) -> Result<AssignmentRule, ClientError> {
        (**self).create_rule(draft).await
    }

    async fn update_rule(
        &self,
        id: DbId,
        draft: &RuleDraft,
    ) -> Result<AssignmentRule, ClientError> {
        (**self).update_rule(id, draft).await
    }

    async fn delete_rule(&self, id: DbId) -> Result<(), ClientError> {
        (**self).delete_rule(id).await
    }
}
