//! Assignment operations and directory listings against the fake CRM backend.

mod common;

use serde_json::json;

use common::{lead_json, FakeCrm};
use leadflow_client::assignments::HistoryQuery;
use leadflow_client::directory::LeadQuery;
use leadflow_client::AssignmentBackend;

#[tokio::test]
async fn bulk_assign_sends_one_batched_request() {
    let crm = FakeCrm::start().await;
    crm.respond_data(
        "POST",
        "/assignments/leads/bulk-assign",
        json!({"assignedCount": 3, "leadIds": [1, 2, 3]}),
    );

    let summary = crm
        .client()
        .assignments()
        .bulk_assign_leads(&[1, 2, 3], 8, "Territory change")
        .await
        .unwrap();

    assert_eq!(summary.assigned_count, 3);
    let reqs = crm.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(
        reqs[0].body,
        json!({"leadIds": [1, 2, 3], "assignedTo": 8, "reason": "Territory change"})
    );
}

#[tokio::test]
async fn bulk_assign_without_data_yields_default_summary() {
    let crm = FakeCrm::start().await;
    crm.respond(
        "POST",
        "/assignments/leads/bulk-assign",
        200,
        json!({"success": true, "message": "3 leads assigned"}),
    );

    let summary = crm
        .client()
        .assignments()
        .bulk_assign_leads(&[1, 2, 3], 8, "")
        .await
        .unwrap();

    assert_eq!(summary.assigned_count, 0);
}

#[tokio::test]
async fn single_assign_and_reassign_bodies() {
    let crm = FakeCrm::start().await;
    crm.respond_data("POST", "/assignments/leads/4/assign", lead_json(4, Some(2)));
    crm.respond_data("POST", "/assignments/leads/4/reassign", lead_json(4, Some(3)));

    let ops = crm.client().assignments();
    let lead = ops.assign_lead(4, 2, "new territory").await.unwrap();
    assert_eq!(lead.assigned_to, Some(2));
    let lead = ops.reassign_lead(4, 3, "vacation cover").await.unwrap();
    assert_eq!(lead.assigned_to, Some(3));

    let reqs = crm.requests();
    assert_eq!(reqs[0].body, json!({"assignedTo": 2, "reason": "new territory"}));
    assert_eq!(
        reqs[1].body,
        json!({"newAssignedTo": 3, "reason": "vacation cover"})
    );
}

#[tokio::test]
async fn auto_assign_single_and_bulk() {
    let crm = FakeCrm::start().await;
    crm.respond_data(
        "POST",
        "/assignments/leads/6/auto-assign",
        json!({"leadId": 6, "assignedTo": 11, "ruleId": 2, "assignmentType": "round_robin"}),
    );
    crm.respond_data(
        "POST",
        "/assignments/leads/bulk-auto-assign",
        json!({"processed": 2, "assigned": 2, "results": []}),
    );

    let ops = crm.client().assignments();
    let outcome = ops.auto_assign_lead(6).await.unwrap();
    assert_eq!(outcome.assigned_to, Some(11));
    assert_eq!(outcome.rule_id, Some(2));

    let summary = ops.process_bulk_auto_assignment(&[6, 7]).await.unwrap();
    assert_eq!(summary.assigned, 2);
    assert_eq!(crm.requests()[1].body, json!({"leadIds": [6, 7]}));
}

#[tokio::test]
async fn workload_stats_and_redistribute() {
    let crm = FakeCrm::start().await;
    crm.respond_data(
        "GET",
        "/assignments/workload",
        json!([
            {"userId": 1, "userName": "Ana", "userEmail": "ana@example.com", "totalLeads": 8,
             "activeLeads": 5, "wonLeads": 2, "lostLeads": 1, "totalDealValue": 1200.0, "avgDealValue": 600.0}
        ]),
    );
    crm.respond_data(
        "GET",
        "/assignments/stats",
        json!({"totalLeads": 40, "assignedLeads": 30, "unassignedLeads": 10}),
    );
    crm.respond_data(
        "POST",
        "/assignments/redistribute",
        json!({"redistributed": 10, "usersAffected": 3}),
    );
    crm.respond_data("GET", "/assignments/routing-stats", json!({"roundRobinIndex": 4}));

    let client = crm.client();
    let workload = client.team_workload().await.unwrap();
    assert_eq!(workload[0].user_name, "Ana");
    assert_eq!(workload[0].total_leads, 8);

    let stats = client.assignment_stats().await.unwrap();
    assert_eq!(stats.unassigned_leads, 10);

    let summary = client.redistribute_leads().await.unwrap();
    assert_eq!(summary.redistributed, 10);

    let routing = client.assignments().get_routing_stats().await.unwrap();
    assert_eq!(routing["roundRobinIndex"], 4);
}

#[tokio::test]
async fn history_queries_pass_filters() {
    let crm = FakeCrm::start().await;
    crm.respond_data(
        "GET",
        "/assignments/history",
        json!([{"id": 1, "leadId": 3, "assignedTo": 2, "reason": "manual"}]),
    );
    crm.respond_data(
        "GET",
        "/assignments/leads/3/assignment-history",
        json!({"history": [{"id": 1, "leadId": 3}]}),
    );

    let ops = crm.client().assignments();
    let rows = ops
        .get_assignment_history(&HistoryQuery {
            user_id: Some(2),
            limit: Some(25),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows[0].reason.as_deref(), Some("manual"));

    let rows = ops.get_lead_assignment_history(3).await.unwrap();
    assert_eq!(rows.len(), 1);

    let query = crm.requests()[0].query.clone().unwrap();
    assert!(query.contains("userId=2"));
    assert!(query.contains("limit=25"));
    assert!(!query.contains("leadId"));
}

#[tokio::test]
async fn recommendations_decode() {
    let crm = FakeCrm::start().await;
    crm.respond_data(
        "GET",
        "/assignments/leads/9/recommendations",
        json!([{"userId": 4, "userName": "Bo", "score": 0.92, "currentWorkload": 3}]),
    );

    let recs = crm
        .client()
        .assignments()
        .get_assignment_recommendations(9)
        .await
        .unwrap();
    assert_eq!(recs[0].user_id, 4);
    assert_eq!(recs[0].current_workload, 3);
}

#[tokio::test]
async fn directory_lists_wrapped_leads_and_bare_users() {
    let crm = FakeCrm::start().await;
    crm.respond_data(
        "GET",
        "/leads",
        json!({"leads": [lead_json(1, None), lead_json(2, Some(5))], "total": 2}),
    );
    crm.respond_data(
        "GET",
        "/users",
        json!([
            {"id": 1, "first_name": "Root", "last_name": "Admin", "email": "a@x.io", "role": "admin"},
            {"id": 5, "first_name": "Sam", "last_name": "Rep", "email": "s@x.io", "role": "sales_rep"}
        ]),
    );

    let directory = crm.client().directory();
    let leads = directory
        .list_leads(&LeadQuery {
            status: Some("new".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[1].assigned_to, Some(5));

    let users = directory.list_users().await.unwrap();
    assert_eq!(users.len(), 2);

    assert_eq!(crm.requests()[0].query.as_deref(), Some("status=new"));
}
