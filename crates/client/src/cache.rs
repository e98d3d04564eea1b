//! Read-through cache in front of an [`AssignmentBackend`].
//!
//! Leads, users and workload are fetched once and served from memory until
//! a mutation goes through this same value, which invalidates the entries
//! the mutation can change. Stats are never cached.

use async_trait::async_trait;
use tokio::sync::RwLock;

use leadflow_core::assignments::{BulkAssignSummary, BulkAutoAssignSummary, RedistributionSummary};
use leadflow_core::leads::{Lead, User};
use leadflow_core::types::DbId;
use leadflow_core::workload::{AssignmentStats, WorkloadRecord};

use crate::backend::AssignmentBackend;
use crate::error::ClientError;

/// Keyed slot holding the last successful response for one query.
struct Slot<T> {
    name: &'static str,
    value: RwLock<Option<Vec<T>>>,
}

impl<T: Clone> Slot<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            value: RwLock::new(None),
        }
    }

    async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Vec<T>, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<T>, ClientError>>,
    {
        if let Some(cached) = self.value.read().await.as_ref() {
            tracing::debug!(key = self.name, "Cache hit");
            return Ok(cached.clone());
        }

        let mut slot = self.value.write().await;
        // Another caller may have filled the slot while we waited.
        if let Some(cached) = slot.as_ref() {
            return Ok(cached.clone());
        }
        tracing::debug!(key = self.name, "Cache miss, fetching");
        let fresh = fetch().await?;
        *slot = Some(fresh.clone());
        Ok(fresh)
    }

    async fn invalidate(&self) {
        *self.value.write().await = None;
    }

    async fn is_cached(&self) -> bool {
        self.value.read().await.is_some()
    }
}

/// An [`AssignmentBackend`] that caches reads and invalidates on writes.
pub struct CachingBackend<B> {
    inner: B,
    leads: Slot<Lead>,
    users: Slot<User>,
    workload: Slot<WorkloadRecord>,
}

impl<B: AssignmentBackend> CachingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            leads: Slot::new("leads"),
            users: Slot::new("users"),
            workload: Slot::new("workload"),
        }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Drop every cached entry.
    pub async fn invalidate_all(&self) {
        self.leads.invalidate().await;
        self.users.invalidate().await;
        self.workload.invalidate().await;
    }

    /// Drop entries that lead ownership changes affect.
    pub async fn invalidate_assignments(&self) {
        self.leads.invalidate().await;
        self.workload.invalidate().await;
    }

    pub async fn has_cached_leads(&self) -> bool {
        self.leads.is_cached().await
    }
}

#[async_trait]
impl<B: AssignmentBackend> AssignmentBackend for CachingBackend<B> {
    async fn list_leads(&self) -> Result<Vec<Lead>, ClientError> {
        self.leads.get_or_fetch(|| self.inner.list_leads()).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.users.get_or_fetch(|| self.inner.list_users()).await
    }

    async fn bulk_assign_leads(
        &self,
        lead_ids: &[DbId],
        assigned_to: DbId,
        reason: &str,
    ) -> Result<BulkAssignSummary, ClientError> {
        let result = self
            .inner
            .bulk_assign_leads(lead_ids, assigned_to, reason)
            .await;
        // The server may have applied part of a failed batch.
        self.invalidate_assignments().await;
        result
    }

    async fn bulk_auto_assign(
        &self,
        lead_ids: &[DbId],
    ) -> Result<BulkAutoAssignSummary, ClientError> {
        let result = self.inner.bulk_auto_assign(lead_ids).await;
        self.invalidate_assignments().await;
        result
    }

    async fn team_workload(&self) -> Result<Vec<WorkloadRecord>, ClientError> {
        self.workload.get_or_fetch(|| self.inner.team_workload()).await
    }

    async fn assignment_stats(&self) -> Result<AssignmentStats, ClientError> {
        self.inner.assignment_stats().await
    }

    async fn redistribute_leads(&self) -> Result<RedistributionSummary, ClientError> {
        let result = self.inner.redistribute_leads().await;
        self.invalidate_assignments().await;
        result
    }
}
