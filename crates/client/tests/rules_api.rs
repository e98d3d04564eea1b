//! Rule repository against the fake CRM backend.

mod common;

use assert_matches::assert_matches;
use serde_json::json;

use common::{rule_json, FakeCrm};
use leadflow_client::ClientError;
use leadflow_core::catalog::AssignmentType;
use leadflow_core::conditions::{Condition, ConditionValue};
use leadflow_core::error::ErrorKind;
use leadflow_core::rules::RuleDraft;

#[tokio::test]
async fn list_rules_decodes_envelope() {
    let crm = FakeCrm::start().await;
    crm.respond_data(
        "GET",
        "/assignments/rules",
        json!([rule_json(1, "Hot leads", 9), rule_json(2, "Default", 1)]),
    );

    let rules = crm.client().rules().list().await.unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].name, "Hot leads");
    assert_eq!(rules[0].assignment_type, AssignmentType::RoundRobin);
    assert_eq!(
        rules[0].conditions.get("lead_score").unwrap().operator,
        "greater_than"
    );
}

#[tokio::test]
async fn list_decodes_membership_conditions() {
    let crm = FakeCrm::start().await;
    let mut rule = rule_json(4, "Named accounts", 8);
    rule["conditions"] = json!({
        "company": {"operator": "in", "expected": ["Acme", "Globex"]}
    });
    crm.respond_data("GET", "/assignments/rules", json!([rule, rule_json(5, "Default", 1)]));

    let rules = crm.client().rules().list().await.unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules[0].conditions.get("company").unwrap().expected,
        Some(ConditionValue::from(vec!["Acme", "Globex"]))
    );
}

#[tokio::test]
async fn list_active_hits_active_path() {
    let crm = FakeCrm::start().await;
    crm.respond_data("GET", "/assignments/rules/active", json!([rule_json(3, "A", 5)]));

    let rules = crm.client().rules().list_active().await.unwrap();

    assert_eq!(rules.len(), 1);
    assert_eq!(crm.requests()[0].path, "/assignments/rules/active");
}

#[tokio::test]
async fn get_by_id_missing_rule_is_not_found() {
    let crm = FakeCrm::start().await;
    crm.respond(
        "GET",
        "/assignments/rules/99",
        404,
        json!({"success": false, "error": "Assignment rule not found"}),
    );

    let err = crm.client().rules().get_by_id(99).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_matches!(err, ClientError::Api { status: 404, ref message } if message == "Assignment rule not found");
}

#[tokio::test]
async fn create_posts_camel_case_draft() {
    let crm = FakeCrm::start().await;
    crm.respond_data("POST", "/assignments/rules", rule_json(10, "Enterprise", 7));

    let mut draft = RuleDraft::new("Enterprise");
    draft.priority = 7;
    draft.assignment_type = AssignmentType::SpecificUser;
    draft.assigned_to = Some(4);
    draft.conditions.insert(Condition::new(
        "annual_revenue",
        "greater_than",
        Some(1_000_000.0.into()),
    ));

    let created = crm.client().rules().create(&draft).await.unwrap();
    assert_eq!(created.id, 10);

    let req = &crm.requests()[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.body["name"], "Enterprise");
    assert_eq!(req.body["assignmentType"], "specific_user");
    assert_eq!(req.body["assignedTo"], 4);
    assert_eq!(req.body["priority"], 7);
    assert_eq!(
        req.body["conditions"]["annual_revenue"]["operator"],
        "greater_than"
    );
}

#[tokio::test]
async fn update_puts_to_rule_path() {
    let crm = FakeCrm::start().await;
    crm.respond_data("PUT", "/assignments/rules/5", rule_json(5, "Renamed", 3));

    let updated = crm
        .client()
        .rules()
        .update(5, &RuleDraft::new("Renamed"))
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(crm.requests()[0].method, "PUT");
}

#[tokio::test]
async fn delete_ignores_response_data() {
    let crm = FakeCrm::start().await;
    crm.respond(
        "DELETE",
        "/assignments/rules/5",
        200,
        json!({"success": true, "message": "Rule deleted"}),
    );

    crm.client().rules().delete(5).await.unwrap();

    assert_eq!(crm.requests()[0].method, "DELETE");
}

#[tokio::test]
async fn conflict_surfaces_server_message() {
    let crm = FakeCrm::start().await;
    crm.respond(
        "POST",
        "/assignments/rules",
        409,
        json!({"success": false, "message": "A rule with this name already exists"}),
    );

    let err = crm
        .client()
        .rules()
        .create(&RuleDraft::new("Dup"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.display_message(), "A rule with this name already exists");
}
