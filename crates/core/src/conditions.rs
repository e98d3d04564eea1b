//! Assignment rule conditions and their validation.
//!
//! A rule's conditions are a map from lead field name to a condition on
//! that field. Validation never stops at the first problem: every entry is
//! checked and every error reported, so an editor can flag all invalid
//! conditions at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{find_field, find_operator, LeadField};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The value a condition compares a lead attribute against.
///
/// Scalars cover the comparison operators; `in` / `not_in` carry a list.
/// Any other JSON shape is kept verbatim so that every payload the
/// validator accepts also decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(Map<String, Value>),
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::Text(s.to_string())
    }
}

impl From<f64> for ConditionValue {
    fn from(n: f64) -> Self {
        ConditionValue::Number(n)
    }
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        ConditionValue::Bool(b)
    }
}

impl From<Vec<&str>> for ConditionValue {
    fn from(items: Vec<&str>) -> Self {
        ConditionValue::List(items.into_iter().map(Value::from).collect())
    }
}

/// A single test against one lead field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub field: String,
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<ConditionValue>,
}

impl Condition {
    pub fn new(field: &str, operator: &str, expected: Option<ConditionValue>) -> Self {
        Self {
            field: field.to_string(),
            operator: operator.to_string(),
            expected,
        }
    }
}

/// Conditions keyed by field name; at most one condition per field.
///
/// On the wire this is a JSON object whose keys duplicate each condition's
/// `field`. When a payload omits `field` inside a condition, the key fills
/// it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Condition>",
    into = "BTreeMap<String, Condition>"
)]
pub struct ConditionSet {
    entries: BTreeMap<String, Condition>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a condition keyed by its own field, replacing any previous
    /// condition on that field.
    pub fn insert(&mut self, condition: Condition) -> Option<Condition> {
        self.entries.insert(condition.field.clone(), condition)
    }

    pub fn remove(&mut self, field: &str) -> Option<Condition> {
        self.entries.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.entries.get(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<Condition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        let mut set = ConditionSet::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl From<BTreeMap<String, Condition>> for ConditionSet {
    fn from(map: BTreeMap<String, Condition>) -> Self {
        let entries = map
            .into_iter()
            .map(|(key, mut condition)| {
                if condition.field.is_empty() {
                    condition.field = key.clone();
                }
                (key, condition)
            })
            .collect();
        Self { entries }
    }
}

impl From<ConditionSet> for BTreeMap<String, Condition> {
    fn from(set: ConditionSet) -> Self {
        set.entries
    }
}

/// Outcome of a collect-all-errors validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ConditionValidation {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Collapse into a single [`CoreError::Validation`] if any errors were found.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.valid {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors.join("; ")))
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an untyped condition payload against the field and operator
/// catalogs.
///
/// Entries are checked in the payload's own order. Each invalid entry
/// contributes exactly one error; checking moves on to the next entry after
/// the first problem found in the current one.
pub fn validate_rule_conditions(conditions: &Value) -> ConditionValidation {
    let Some(entries) = conditions.as_object() else {
        return ConditionValidation::from_errors(vec!["Conditions must be an object".to_string()]);
    };

    let errors = entries
        .iter()
        .filter_map(|(field, condition)| check_raw_entry(field, condition))
        .collect();

    ConditionValidation::from_errors(errors)
}

/// Validate a typed condition set with the same policy as
/// [`validate_rule_conditions`].
pub fn validate_condition_set(conditions: &ConditionSet) -> ConditionValidation {
    let errors = conditions
        .iter()
        .filter_map(|(field, condition)| {
            let Some(lead_field) = find_field(field) else {
                return Some(format!("Unknown field: {field}"));
            };
            if condition.operator.is_empty() {
                return Some(format!("Missing operator for field {field}"));
            }
            check_operator(
                lead_field,
                &condition.operator,
                condition.expected.is_some(),
            )
        })
        .collect();

    ConditionValidation::from_errors(errors)
}

/// Validate an untyped payload and, if it is sound, convert it into a
/// [`ConditionSet`].
pub fn parse_conditions(conditions: &Value) -> Result<ConditionSet, CoreError> {
    validate_rule_conditions(conditions).into_result()?;
    serde_json::from_value(conditions.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid conditions: {e}")))
}

fn check_raw_entry(field: &str, condition: &Value) -> Option<String> {
    let Some(lead_field) = find_field(field) else {
        return Some(format!("Unknown field: {field}"));
    };
    let Some(body) = condition.as_object() else {
        return Some(format!("Invalid condition for field {field}"));
    };
    let operator = match body.get("operator") {
        Some(v) if is_truthy(v) => v,
        _ => return Some(format!("Missing operator for field {field}")),
    };
    let operator = match operator {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let has_expected = body.get("expected").is_some_and(|v| !v.is_null());

    check_operator(lead_field, &operator, has_expected)
}

/// Steps shared by the raw and typed paths once the field is resolved and
/// an operator name is present.
fn check_operator(lead_field: &LeadField, operator: &str, has_expected: bool) -> Option<String> {
    let Some(op) = find_operator(operator) else {
        return Some(format!("Unknown operator: {operator}"));
    };
    if !op.supports(lead_field.field_type) {
        return Some(format!(
            "Operator {operator} is not compatible with field type {}",
            lead_field.field_type
        ));
    }
    if !has_expected && op.requires_value() {
        return Some(format!(
            "Missing expected value for field {}",
            lead_field.name
        ));
    }
    None
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
