//! Static catalogs for assignment rule authoring.
//!
//! Three catalogs drive both the rule editor widgets and condition
//! validation: the lead fields a condition may test, the comparison
//! operators with the field types each one accepts, and the assignment
//! strategies a rule may use.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field types
// ---------------------------------------------------------------------------

/// Semantic type of a lead attribute, used for operator compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Date,
    Boolean,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All field types, in display order.
pub const ALL_FIELD_TYPES: &[FieldType] = &[
    FieldType::String,
    FieldType::Number,
    FieldType::Date,
    FieldType::Boolean,
];

// ---------------------------------------------------------------------------
// Lead fields
// ---------------------------------------------------------------------------

/// A lead attribute that assignment conditions may test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeadField {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

const fn field(name: &'static str, label: &'static str, field_type: FieldType) -> LeadField {
    LeadField {
        name,
        label,
        field_type,
    }
}

/// Lead attributes eligible for rule conditions.
pub const LEAD_FIELDS: &[LeadField] = &[
    field("first_name", "First Name", FieldType::String),
    field("last_name", "Last Name", FieldType::String),
    field("email", "Email", FieldType::String),
    field("phone", "Phone", FieldType::String),
    field("company", "Company", FieldType::String),
    field("job_title", "Job Title", FieldType::String),
    field("industry", "Industry", FieldType::String),
    field("lead_source", "Lead Source", FieldType::String),
    field("lead_status", "Lead Status", FieldType::String),
    field("country", "Country", FieldType::String),
    field("state", "State / Region", FieldType::String),
    field("city", "City", FieldType::String),
    field("lead_score", "Lead Score", FieldType::Number),
    field("estimated_value", "Estimated Value", FieldType::Number),
    field("annual_revenue", "Annual Revenue", FieldType::Number),
    field("employee_count", "Employee Count", FieldType::Number),
    field("expected_close_date", "Expected Close Date", FieldType::Date),
    field("created_at", "Created Date", FieldType::Date),
    field("is_qualified", "Qualified", FieldType::Boolean),
    field("email_opt_in", "Email Opt-In", FieldType::Boolean),
];

pub fn lead_fields() -> &'static [LeadField] {
    LEAD_FIELDS
}

/// Look up a lead field by its unique name.
pub fn find_field(name: &str) -> Option<&'static LeadField> {
    LEAD_FIELDS.iter().find(|f| f.name == name)
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

pub const OP_EQUALS: &str = "equals";
pub const OP_NOT_EQUALS: &str = "not_equals";
pub const OP_CONTAINS: &str = "contains";
pub const OP_NOT_CONTAINS: &str = "not_contains";
pub const OP_STARTS_WITH: &str = "starts_with";
pub const OP_ENDS_WITH: &str = "ends_with";
pub const OP_IN: &str = "in";
pub const OP_NOT_IN: &str = "not_in";
pub const OP_GREATER_THAN: &str = "greater_than";
pub const OP_GREATER_THAN_OR_EQUAL: &str = "greater_than_or_equal";
pub const OP_LESS_THAN: &str = "less_than";
pub const OP_LESS_THAN_OR_EQUAL: &str = "less_than_or_equal";
pub const OP_BEFORE: &str = "before";
pub const OP_AFTER: &str = "after";
pub const OP_IS_EMPTY: &str = "is_empty";
pub const OP_IS_NOT_EMPTY: &str = "is_not_empty";

/// Operators that test presence and therefore take no expected value.
pub const VALUELESS_OPERATORS: &[&str] = &[OP_IS_EMPTY, OP_IS_NOT_EMPTY];

/// A comparison operator and the field types it can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionOperator {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "types")]
    pub compatible_types: &'static [FieldType],
}

impl ConditionOperator {
    pub fn supports(&self, field_type: FieldType) -> bool {
        self.compatible_types.contains(&field_type)
    }

    /// Whether a condition using this operator needs an expected value.
    pub fn requires_value(&self) -> bool {
        !VALUELESS_OPERATORS.contains(&self.name)
    }
}

const fn op(
    name: &'static str,
    label: &'static str,
    compatible_types: &'static [FieldType],
) -> ConditionOperator {
    ConditionOperator {
        name,
        label,
        compatible_types,
    }
}

const ANY_TYPE: &[FieldType] = ALL_FIELD_TYPES;
const TEXT: &[FieldType] = &[FieldType::String];
const NUMERIC: &[FieldType] = &[FieldType::Number];
const TEMPORAL: &[FieldType] = &[FieldType::Date];
const PRESENCE: &[FieldType] = &[FieldType::String, FieldType::Number, FieldType::Date];

/// Comparison operators available to rule conditions.
pub const CONDITION_OPERATORS: &[ConditionOperator] = &[
    op(OP_EQUALS, "Equals", ANY_TYPE),
    op(OP_NOT_EQUALS, "Does not equal", ANY_TYPE),
    op(OP_CONTAINS, "Contains", TEXT),
    op(OP_NOT_CONTAINS, "Does not contain", TEXT),
    op(OP_STARTS_WITH, "Starts with", TEXT),
    op(OP_ENDS_WITH, "Ends with", TEXT),
    op(OP_IN, "Is one of", TEXT),
    op(OP_NOT_IN, "Is not one of", TEXT),
    op(OP_GREATER_THAN, "Greater than", NUMERIC),
    op(OP_GREATER_THAN_OR_EQUAL, "Greater than or equal to", NUMERIC),
    op(OP_LESS_THAN, "Less than", NUMERIC),
    op(OP_LESS_THAN_OR_EQUAL, "Less than or equal to", NUMERIC),
    op(OP_BEFORE, "Before", TEMPORAL),
    op(OP_AFTER, "After", TEMPORAL),
    op(OP_IS_EMPTY, "Is empty", PRESENCE),
    op(OP_IS_NOT_EMPTY, "Is not empty", PRESENCE),
];

pub fn condition_operators() -> &'static [ConditionOperator] {
    CONDITION_OPERATORS
}

/// Look up an operator by its unique name.
pub fn find_operator(name: &str) -> Option<&'static ConditionOperator> {
    CONDITION_OPERATORS.iter().find(|o| o.name == name)
}

/// Operators usable with a field of the given type, in catalog order.
pub fn operators_for(field_type: FieldType) -> Vec<&'static ConditionOperator> {
    CONDITION_OPERATORS
        .iter()
        .filter(|o| o.supports(field_type))
        .collect()
}

// ---------------------------------------------------------------------------
// Assignment types
// ---------------------------------------------------------------------------

/// Strategy a rule uses to pick the owner of a matching lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    RoundRobin,
    SpecificUser,
    Team,
}

impl AssignmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentType::RoundRobin => "round_robin",
            AssignmentType::SpecificUser => "specific_user",
            AssignmentType::Team => "team",
        }
    }
}

/// Display descriptor for an [`AssignmentType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignmentTypeInfo {
    pub value: AssignmentType,
    pub label: &'static str,
    pub description: &'static str,
}

pub const ASSIGNMENT_TYPES: &[AssignmentTypeInfo] = &[
    AssignmentTypeInfo {
        value: AssignmentType::RoundRobin,
        label: "Round Robin",
        description: "Distribute leads evenly across all eligible users",
    },
    AssignmentTypeInfo {
        value: AssignmentType::SpecificUser,
        label: "Specific User",
        description: "Assign every matching lead to one chosen user",
    },
    AssignmentTypeInfo {
        value: AssignmentType::Team,
        label: "Team",
        description: "Assign to the team member with the lowest current workload",
    },
];

pub fn assignment_types() -> &'static [AssignmentTypeInfo] {
    ASSIGNMENT_TYPES
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_operator_declares_known_types() {
        for op in condition_operators() {
            assert!(
                !op.compatible_types.is_empty(),
                "{} has no compatible types",
                op.name
            );
            for t in op.compatible_types {
                assert!(ALL_FIELD_TYPES.contains(t));
            }
        }
    }

    #[test]
    fn catalog_names_are_unique() {
        let fields: HashSet<_> = lead_fields().iter().map(|f| f.name).collect();
        assert_eq!(fields.len(), lead_fields().len());

        let ops: HashSet<_> = condition_operators().iter().map(|o| o.name).collect();
        assert_eq!(ops.len(), condition_operators().len());
    }

    #[test]
    fn only_presence_operators_skip_values() {
        let valueless: Vec<_> = condition_operators()
            .iter()
            .filter(|o| !o.requires_value())
            .map(|o| o.name)
            .collect();
        assert_eq!(valueless, vec![OP_IS_EMPTY, OP_IS_NOT_EMPTY]);
    }

    #[test]
    fn greater_than_is_numeric_only() {
        let gt = find_operator(OP_GREATER_THAN).unwrap();
        assert!(gt.supports(FieldType::Number));
        assert!(!gt.supports(FieldType::String));
        assert!(!gt.supports(FieldType::Date));
    }

    #[test]
    fn lookups_resolve_known_names() {
        assert_eq!(find_field("lead_score").unwrap().field_type, FieldType::Number);
        assert_eq!(find_field("company").unwrap().field_type, FieldType::String);
        assert!(find_field("favourite_colour").is_none());
        assert!(find_operator("matches_regex").is_none());
    }

    #[test]
    fn boolean_fields_only_offer_equality() {
        let names: Vec<_> = operators_for(FieldType::Boolean)
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec![OP_EQUALS, OP_NOT_EQUALS]);
    }

    #[test]
    fn catalog_covers_every_field_type() {
        for t in ALL_FIELD_TYPES {
            assert!(lead_fields().iter().any(|f| f.field_type == *t));
            assert!(!operators_for(*t).is_empty());
        }
    }

    #[test]
    fn assignment_types_serialize_snake_case() {
        let json = serde_json::to_value(assignment_types()).unwrap();
        assert_eq!(json[0]["value"], "round_robin");
        assert_eq!(json[1]["value"], "specific_user");
        assert_eq!(json[2]["value"], "team");
    }

    #[test]
    fn field_type_display_matches_wire_name() {
        for t in ALL_FIELD_TYPES {
            let wire = serde_json::to_value(t).unwrap();
            assert_eq!(wire, t.to_string());
        }
    }
}
