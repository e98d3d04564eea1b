//! Rule authoring: validate locally, then save through a [`RuleStore`].

use leadflow_client::RuleStore;
use leadflow_core::rules::{sort_by_evaluation_order, validate_rule_draft, AssignmentRule, RuleDraft};
use leadflow_core::types::DbId;

use crate::error::WorkflowError;

pub struct RuleEditor<S> {
    store: S,
}

impl<S: RuleStore> RuleEditor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rules in the order the server evaluates them.
    pub async fn list(&self) -> Result<Vec<AssignmentRule>, WorkflowError> {
        let mut rules = self.store.list_rules().await?;
        sort_by_evaluation_order(&mut rules);
        Ok(rules)
    }

    /// Create (`existing == None`) or update a rule.
    ///
    /// Every validation message is returned at once, joined with `"; "`,
    /// and nothing is sent when any check fails.
    pub async fn submit(
        &self,
        draft: &RuleDraft,
        existing: Option<DbId>,
    ) -> Result<AssignmentRule, WorkflowError> {
        let report = validate_rule_draft(draft);
        if !report.valid {
            tracing::debug!(errors = report.errors.len(), "Rule draft rejected");
            return Err(WorkflowError::Validation(report.errors.join("; ")));
        }

        let saved = match existing {
            Some(id) => self.store.update_rule(id, draft).await?,
            None => self.store.create_rule(draft).await?,
        };
        tracing::info!(rule_id = saved.id, name = %saved.name, "Assignment rule saved");
        Ok(saved)
    }

    /// Flip `is_active` on an existing rule.
    pub async fn toggle_active(
        &self,
        rule: &AssignmentRule,
    ) -> Result<AssignmentRule, WorkflowError> {
        let mut draft = RuleDraft::from(rule);
        draft.is_active = !rule.is_active;
        Ok(self.store.update_rule(rule.id, &draft).await?)
    }

    pub async fn delete(&self, id: DbId) -> Result<(), WorkflowError> {
        self.store.delete_rule(id).await?;
        tracing::info!(rule_id = id, "Assignment rule deleted");
        Ok(())
    }
}
