//! Client-side lead filtering and bulk selection.
//!
//! Filtering composes predicates over an already-fetched lead list; it
//! never triggers a fetch. Selection is a set of lead ids whose
//! select-all toggle is scoped to the currently filtered leads.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::leads::Lead;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Filter on a lead's current owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "user_id")]
pub enum AssigneeFilter {
    #[default]
    Any,
    Unassigned,
    User(DbId),
}

/// Filters applied to the bulk assignment lead list.
///
/// `None` / empty means "no constraint" for each dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFilters {
    pub status: Option<String>,
    pub source: Option<String>,
    pub assigned_to: AssigneeFilter,
    pub search: String,
}

impl LeadFilters {
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(status) = &self.status {
            if lead.status.as_deref() != Some(status.as_str()) {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if lead.source.as_deref() != Some(source.as_str()) {
                return false;
            }
        }
        let owner_ok = match self.assigned_to {
            AssigneeFilter::Any => true,
            AssigneeFilter::Unassigned => lead.assigned_to.is_none(),
            AssigneeFilter::User(id) => lead.assigned_to == Some(id),
        };
        owner_ok && matches_search(lead, &self.search)
    }

    pub fn is_empty(&self) -> bool {
        *self == LeadFilters::default()
    }
}

/// Case-insensitive match of `term` against first name, last name, full
/// name, email, or company. A blank term matches everything.
pub fn matches_search(lead: &Lead, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    let hit = |s: &str| !s.is_empty() && s.to_lowercase().contains(&term);

    hit(&lead.first_name)
        || hit(&lead.last_name)
        || hit(&lead.full_name())
        || lead.email.as_deref().is_some_and(hit)
        || lead.company.as_deref().is_some_and(hit)
}

/// Leads passing all filters, in their original order.
pub fn filter_leads<'a>(leads: &'a [Lead], filters: &LeadFilters) -> Vec<&'a Lead> {
    leads.iter().filter(|l| filters.matches(l)).collect()
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Set of selected lead ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSelection {
    ids: BTreeSet<DbId>,
}

impl LeadSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, id: DbId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Toggle select-all over the visible (filtered) ids.
    ///
    /// When the selection size equals the visible count the selection is
    /// cleared; otherwise it becomes exactly the visible ids. Ids selected
    /// earlier but now filtered out are dropped either way.
    pub fn toggle_all(&mut self, visible: &[DbId]) {
        if self.ids.len() == visible.len() {
            self.ids.clear();
        } else {
            self.ids = visible.iter().copied().collect();
        }
    }

    /// Drop ids that are not in `visible`.
    pub fn retain_visible(&mut self, visible: &[DbId]) {
        let keep: BTreeSet<DbId> = visible.iter().copied().collect();
        self.ids.retain(|id| keep.contains(id));
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<DbId> {
        self.ids.iter().copied().collect()
    }
}
