//! Assignment rule models and local draft validation.
//!
//! The server owns rule evaluation and ordering. The client only checks a
//! draft's shape before it is submitted, reporting every problem at once.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::AssignmentType;
use crate::conditions::{validate_condition_set, ConditionSet, ConditionValidation};
use crate::types::{DbId, Timestamp};

/// Lowest rule priority.
pub const MIN_PRIORITY: i32 = 1;
/// Highest rule priority; higher priorities are evaluated first.
pub const MAX_PRIORITY: i32 = 10;
/// Priority given to drafts that do not set one.
pub const DEFAULT_PRIORITY: i32 = 5;

/// An assignment rule as returned by `GET /assignments/rules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRule {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub conditions: ConditionSet,
    pub assignment_type: AssignmentType,
    #[serde(default)]
    pub assigned_to: Option<DbId>,
    pub priority: i32,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Body for creating or updating a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    #[validate(length(min = 1, max = 255, message = "Rule name must be at most 255 characters"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
    pub conditions: ConditionSet,
    pub assignment_type: AssignmentType,
    #[serde(default)]
    pub assigned_to: Option<DbId>,
    #[validate(range(min = 1, max = 10, message = "Priority must be between 1 and 10"))]
    pub priority: i32,
    pub is_active: bool,
}

impl RuleDraft {
    /// A new, active round-robin draft with default priority and no conditions.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            conditions: ConditionSet::new(),
            assignment_type: AssignmentType::RoundRobin,
            assigned_to: None,
            priority: DEFAULT_PRIORITY,
            is_active: true,
        }
    }
}

impl From<&AssignmentRule> for RuleDraft {
    fn from(rule: &AssignmentRule) -> Self {
        Self {
            name: rule.name.clone(),
            description: rule.description.clone(),
            conditions: rule.conditions.clone(),
            assignment_type: rule.assignment_type,
            assigned_to: rule.assigned_to,
            priority: rule.priority,
            is_active: rule.is_active,
        }
    }
}

/// Validate a rule draft before submission.
///
/// Checks, in order: name present, attribute limits, at least one
/// condition, every condition well-formed, and a target user for
/// `specific_user` rules. All failures are reported.
pub fn validate_rule_draft(draft: &RuleDraft) -> ConditionValidation {
    let mut errors = Vec::new();

    let blank_name = draft.name.trim().is_empty();
    if blank_name {
        errors.push("Rule name is required".to_string());
    }

    if let Err(field_errors) = draft.validate() {
        let mut fields: Vec<_> = field_errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, errs) in fields {
            // Blank names are already reported above.
            if field == "name" && blank_name {
                continue;
            }
            for e in errs {
                errors.push(
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}")),
                );
            }
        }
    }

    if draft.conditions.is_empty() {
        errors.push("At least one condition is required".to_string());
    } else {
        errors.extend(validate_condition_set(&draft.conditions).errors);
    }

    if draft.assignment_type == AssignmentType::SpecificUser && draft.assigned_to.is_none() {
        errors.push("A target user is required for specific user assignment".to_string());
    }

    ConditionValidation::from_errors(errors)
}

/// Order rules the way the server evaluates them: highest priority first,
/// ties broken by id.
pub fn sort_by_evaluation_order(rules: &mut [AssignmentRule]) {
    rules.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
}
