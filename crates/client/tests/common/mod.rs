#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::{json, Value};

use leadflow_client::CrmClient;

/// API root prefix the fake backend is mounted under.
pub const API_PREFIX: &str = "/api";

/// A request captured by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to the API root, e.g. `/assignments/rules`.
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Clone, Default)]
struct FakeState {
    routes: Arc<Mutex<HashMap<(String, String), (u16, Value)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process CRM API double served by axum on an ephemeral port.
///
/// Responses are canned per `(method, path)`; every request is recorded
/// so tests can assert on paths and bodies.
pub struct FakeCrm {
    pub url: String,
    state: FakeState,
}

impl FakeCrm {
    pub async fn start() -> Self {
        let state = FakeState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake CRM listener");
        let addr = listener.local_addr().expect("fake CRM address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake CRM server");
        });

        Self {
            url: format!("http://{addr}{API_PREFIX}"),
            state,
        }
    }

    /// Answer `method path` with `status` and a raw JSON body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    /// Answer `method path` with a `{ success: true, data }` envelope.
    pub fn respond_data(&self, method: &str, path: &str, data: Value) {
        self.respond(method, path, 200, json!({"success": true, "data": data}));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn client(&self) -> CrmClient {
        CrmClient::new(self.url.clone())
    }
}

async fn handle(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        authorization: header("authorization"),
        request_id: header("x-request-id"),
    });

    let canned = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();

    match canned {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(body),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "error": "Route not found"})),
        ),
    }
}

pub fn rule_json(id: i64, name: &str, priority: i32) -> Value {
    json!({
        "id": id,
        "name": name,
        "conditions": {"lead_score": {"operator": "greater_than", "expected": 50}},
        "assignmentType": "round_robin",
        "assignedTo": null,
        "priority": priority,
        "isActive": true
    })
}

pub fn lead_json(id: i64, owner: Option<i64>) -> Value {
    json!({
        "id": id,
        "first_name": format!("Lead{id}"),
        "last_name": "Example",
        "email": format!("lead{id}@example.com"),
        "company": "Acme",
        "status": "new",
        "source": "web",
        "assigned_to": owner
    })
}
