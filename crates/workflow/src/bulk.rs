//! Bulk lead assignment workflow.
//!
//! A session moves through
//! `Closed -> Loading -> Ready -> Submitting -> Ready | Error`:
//!
//! - [`BulkAssignment::open`] fetches leads and users concurrently (or only
//!   users when the caller supplies the leads) and lands in `Ready`.
//! - Filtering and selection are local to the fetched list.
//! - [`BulkAssignment::submit_bulk_assign`] and
//!   [`BulkAssignment::submit_auto_assign`] send one batched request and
//!   refetch on success.
//! - [`BulkAssignment::close`] clears every field and cancels the session
//!   token, so a response that arrives afterwards is dropped.

use std::collections::BTreeSet;
use std::future::Future;

use leadflow_client::{AssignmentBackend, ClientError};
use leadflow_core::assignments::{BulkAssignSummary, BulkAutoAssignSummary};
use leadflow_core::filters::{filter_leads, LeadFilters, LeadSelection};
use leadflow_core::leads::{assignable_users, Lead, User};
use leadflow_core::types::DbId;
use tokio_util::sync::CancellationToken;

use crate::error::WorkflowError;

pub const MSG_NO_SELECTION: &str = "Please select at least one lead";
pub const MSG_NO_TARGET: &str = "Please select a user to assign the leads to";

/// Lifecycle of a bulk assignment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkState {
    Closed,
    Loading,
    Ready,
    Submitting,
    /// Loading failed; only `close` or a new `open` leave this state.
    Error,
}

/// One bulk assignment session over an [`AssignmentBackend`].
pub struct BulkAssignment<B> {
    backend: B,
    state: BulkState,
    leads: Vec<Lead>,
    users: Vec<User>,
    /// Ids of a caller-supplied lead list; refetches stay within it.
    preloaded: Option<BTreeSet<DbId>>,
    filters: LeadFilters,
    selection: LeadSelection,
    target_user: Option<DbId>,
    reason: String,
    error: Option<String>,
    cancel: CancellationToken,
}

impl<B: AssignmentBackend> BulkAssignment<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: BulkState::Closed,
            leads: Vec::new(),
            users: Vec::new(),
            preloaded: None,
            filters: LeadFilters::default(),
            selection: LeadSelection::new(),
            target_user: None,
            reason: String::new(),
            error: None,
            cancel: CancellationToken::new(),
        }
    }

    // ---- accessors ----

    pub fn state(&self) -> BulkState {
        self.state
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Assignable users (admins excluded).
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn filters(&self) -> &LeadFilters {
        &self.filters
    }

    pub fn selection(&self) -> &LeadSelection {
        &self.selection
    }

    pub fn target_user(&self) -> Option<DbId> {
        self.target_user
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Last error shown to the user, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Token of the current session. Cancelling it from elsewhere has the
    /// same effect on an in-flight operation as [`close`](Self::close).
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Leads passing the current filters, in fetch order.
    pub fn filtered_leads(&self) -> Vec<&Lead> {
        filter_leads(&self.leads, &self.filters)
    }

    fn filtered_ids(&self) -> Vec<DbId> {
        self.filtered_leads().iter().map(|l| l.id).collect()
    }

    // ---- lifecycle ----

    /// Start a new session.
    ///
    /// With `preloaded` leads only users are fetched. Any previous session
    /// is closed first.
    pub async fn open(&mut self, preloaded: Option<Vec<Lead>>) -> Result<(), WorkflowError> {
        self.close();
        self.cancel = CancellationToken::new();
        self.state = BulkState::Loading;
        self.preloaded = preloaded
            .as_ref()
            .map(|leads| leads.iter().map(|l| l.id).collect());

        let token = self.cancel.clone();
        let outcome = guarded(&token, load(&self.backend, preloaded)).await;

        match outcome {
            None => Err(self.discard()),
            Some(Ok((leads, users))) => {
                self.leads = leads;
                self.users = assignable_users(users);
                self.selection.clear();
                self.state = BulkState::Ready;
                tracing::info!(
                    lead_count = self.leads.len(),
                    user_count = self.users.len(),
                    preloaded = self.preloaded.is_some(),
                    "Bulk assignment opened",
                );
                Ok(())
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "Failed to load leads and users");
                self.leads.clear();
                self.users.clear();
                self.preloaded = None;
                self.error = Some(format!(
                    "Failed to load leads and users: {}",
                    e.display_message()
                ));
                self.state = BulkState::Error;
                Err(e.into())
            }
        }
    }

    /// Reset every field and cancel the session token.
    pub fn close(&mut self) {
        self.cancel.cancel();
        self.reset();
    }

    // ---- local edits ----
    //
    // Selection edits apply only in `Ready`; in any other state they are
    // ignored.

    pub fn toggle_lead(&mut self, lead_id: DbId) {
        if self.state == BulkState::Ready {
            self.selection.toggle(lead_id);
        }
    }

    /// Select exactly the filtered leads, or clear the selection when its
    /// size already equals the filtered count.
    pub fn select_all(&mut self) {
        if self.state == BulkState::Ready {
            let visible = self.filtered_ids();
            self.selection.toggle_all(&visible);
        }
    }

    /// Replace the filters. The selection is left as is; see
    /// [`prune_selection`](Self::prune_selection).
    pub fn set_filters(&mut self, filters: LeadFilters) {
        self.filters = filters;
    }

    /// Drop selected ids hidden by the current filters.
    pub fn prune_selection(&mut self) {
        if self.state == BulkState::Ready {
            let visible = self.filtered_ids();
            self.selection.retain_visible(&visible);
        }
    }

    pub fn set_target_user(&mut self, user_id: Option<DbId>) {
        self.target_user = user_id;
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    // ---- submission ----

    /// Assign every selected lead to the target user in one request.
    ///
    /// Fails locally, without a request, when nothing is selected or no
    /// target is set. On a server failure the selection and reason are
    /// kept for a retry.
    pub async fn submit_bulk_assign(&mut self) -> Result<BulkAssignSummary, WorkflowError> {
        self.ensure_ready()?;
        if self.selection.is_empty() {
            return Err(self.reject(MSG_NO_SELECTION));
        }
        let Some(target) = self.target_user else {
            return Err(self.reject(MSG_NO_TARGET));
        };

        let lead_ids = self.selection.ids();
        self.state = BulkState::Submitting;
        self.error = None;

        let token = self.cancel.clone();
        let outcome = guarded(
            &token,
            self.backend
                .bulk_assign_leads(&lead_ids, target, &self.reason),
        )
        .await;

        match outcome {
            None => Err(self.discard()),
            Some(Ok(summary)) => {
                tracing::info!(
                    lead_count = lead_ids.len(),
                    assigned_to = target,
                    "Bulk assignment submitted",
                );
                self.reason.clear();
                self.refresh().await?;
                Ok(summary)
            }
            Some(Err(e)) => Err(self.fail_submit(e)),
        }
    }

    /// Run the server's rule-based auto-assignment over the selection.
    pub async fn submit_auto_assign(&mut self) -> Result<BulkAutoAssignSummary, WorkflowError> {
        self.ensure_ready()?;
        if self.selection.is_empty() {
            return Err(self.reject(MSG_NO_SELECTION));
        }

        let lead_ids = self.selection.ids();
        self.state = BulkState::Submitting;
        self.error = None;

        let token = self.cancel.clone();
        let outcome = guarded(&token, self.backend.bulk_auto_assign(&lead_ids)).await;

        match outcome {
            None => Err(self.discard()),
            Some(Ok(summary)) => {
                tracing::info!(
                    lead_count = lead_ids.len(),
                    assigned = summary.assigned,
                    "Bulk auto-assignment submitted",
                );
                self.refresh().await?;
                Ok(summary)
            }
            Some(Err(e)) => Err(self.fail_submit(e)),
        }
    }

    // ---- private helpers ----

    fn ensure_ready(&self) -> Result<(), WorkflowError> {
        match self.state {
            BulkState::Ready => Ok(()),
            BulkState::Submitting => Err(WorkflowError::NotReady("a submission is in flight")),
            _ => Err(WorkflowError::NotReady("bulk assignment is not open")),
        }
    }

    fn reject(&mut self, message: &str) -> WorkflowError {
        self.error = Some(message.to_string());
        WorkflowError::Validation(message.to_string())
    }

    fn fail_submit(&mut self, e: ClientError) -> WorkflowError {
        tracing::error!(
            error = %e,
            lead_count = self.selection.len(),
            "Bulk submission failed",
        );
        self.error = Some(e.display_message());
        self.state = BulkState::Ready;
        e.into()
    }

    /// Refetch after a successful submission and clear the selection.
    ///
    /// A failed refetch keeps the previous lists and records the error;
    /// the submission itself already succeeded.
    async fn refresh(&mut self) -> Result<(), WorkflowError> {
        let token = self.cancel.clone();
        let outcome = guarded(&token, reload(&self.backend, self.preloaded.as_ref())).await;

        self.selection.clear();
        match outcome {
            None => return Err(self.discard()),
            Some(Ok((leads, users))) => {
                self.leads = leads;
                self.users = assignable_users(users);
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Failed to refresh leads after submission");
                self.error = Some(format!(
                    "Failed to load leads and users: {}",
                    e.display_message()
                ));
            }
        }
        self.state = BulkState::Ready;
        Ok(())
    }

    /// Drop the result of a cancelled operation.
    fn discard(&mut self) -> WorkflowError {
        tracing::debug!("Discarding result of a cancelled bulk assignment session");
        self.reset();
        WorkflowError::Cancelled
    }

    fn reset(&mut self) {
        self.state = BulkState::Closed;
        self.leads.clear();
        self.users.clear();
        self.preloaded = None;
        self.filters = LeadFilters::default();
        self.selection.clear();
        self.target_user = None;
        self.reason.clear();
        self.error = None;
    }
}

/// Await `fut` unless `token` is cancelled first.
async fn guarded<T>(token: &CancellationToken, fut: impl Future<Output = T>) -> Option<T> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        out = fut => Some(out),
    }
}

async fn load<B: AssignmentBackend>(
    backend: &B,
    preloaded: Option<Vec<Lead>>,
) -> Result<(Vec<Lead>, Vec<User>), ClientError> {
    match preloaded {
        Some(leads) => Ok((leads, backend.list_users().await?)),
        None => futures::try_join!(backend.list_leads(), backend.list_users()),
    }
}

async fn reload<B: AssignmentBackend>(
    backend: &B,
    preloaded: Option<&BTreeSet<DbId>>,
) -> Result<(Vec<Lead>, Vec<User>), ClientError> {
    let (mut leads, users) = futures::try_join!(backend.list_leads(), backend.list_users())?;
    if let Some(ids) = preloaded {
        leads.retain(|l| ids.contains(&l.id));
    }
    Ok((leads, users))
}
