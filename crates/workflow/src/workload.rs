//! Read-only team workload view.
//!
//! Fetches workload and stats together; ratios are computed against the
//! busiest user. Redistribution is fire-and-confirm with a full refetch.

use leadflow_client::{AssignmentBackend, ClientError};
use leadflow_core::assignments::RedistributionSummary;
use leadflow_core::workload::{
    load_ratios, max_total_leads, team_totals, AssignmentStats, TeamTotals, WorkloadRecord,
    WorkloadRow,
};

use crate::error::WorkflowError;

pub struct WorkloadView<B> {
    backend: B,
    records: Vec<WorkloadRecord>,
    stats: Option<AssignmentStats>,
    error: Option<String>,
}

impl<B: AssignmentBackend> WorkloadView<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
            stats: None,
            error: None,
        }
    }

    /// Fetch workload and stats concurrently. Both must succeed.
    pub async fn open(&mut self) -> Result<(), WorkflowError> {
        let fetched = futures::try_join!(
            self.backend.team_workload(),
            self.backend.assignment_stats()
        );
        match fetched {
            Ok((records, stats)) => {
                tracing::debug!(user_count = records.len(), "Workload loaded");
                self.records = records;
                self.stats = Some(stats);
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load workload", e)),
        }
    }

    /// Ask the server to rebalance, then refetch whatever the outcome.
    pub async fn redistribute(&mut self) -> Result<RedistributionSummary, WorkflowError> {
        let result = self.backend.redistribute_leads().await;
        let refreshed = self.open().await;

        match result {
            Ok(summary) => {
                tracing::info!(
                    redistributed = summary.redistributed,
                    users_affected = summary.users_affected,
                    "Leads redistributed",
                );
                refreshed.map(|_| summary)
            }
            Err(e) => Err(self.fail("Failed to redistribute leads", e)),
        }
    }

    pub fn records(&self) -> &[WorkloadRecord] {
        &self.records
    }

    pub fn stats(&self) -> Option<&AssignmentStats> {
        self.stats.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Per-user rows with `load_ratio` in `[0, 1]`.
    pub fn rows(&self) -> Vec<WorkloadRow> {
        load_ratios(&self.records)
    }

    pub fn max_total_leads(&self) -> u64 {
        max_total_leads(&self.records)
    }

    pub fn totals(&self) -> TeamTotals {
        team_totals(&self.records)
    }

    fn fail(&mut self, context: &str, e: ClientError) -> WorkflowError {
        tracing::error!(error = %e, "{context}");
        self.error = Some(format!("{context}: {}", e.display_message()));
        e.into()
    }
}
