//! Assignment rule repository (`/assignments/rules`).
//!
//! Thin CRUD wrapper: one HTTP call per method, no retry, no caching. The
//! server is authoritative for rule ordering and matching.

use leadflow_core::rules::{AssignmentRule, RuleDraft};
use leadflow_core::types::DbId;

use crate::envelope::Listing;
use crate::error::ClientError;
use crate::http::CrmClient;

const RULES_PATH: &str = "/assignments/rules";

/// CRUD access to assignment rules.
#[derive(Clone)]
pub struct RuleRepository {
    http: CrmClient,
}

impl RuleRepository {
    pub fn new(http: CrmClient) -> Self {
        Self { http }
    }

    /// All rules, active or not.
    pub async fn list(&self) -> Result<Vec<AssignmentRule>, ClientError> {
        let rules: Listing<AssignmentRule> =
            self.http.fetch("list_rules", self.http.get(RULES_PATH)).await?;
        Ok(rules.into_vec())
    }

    /// Only rules the engine currently evaluates.
    pub async fn list_active(&self) -> Result<Vec<AssignmentRule>, ClientError> {
        let path = format!("{RULES_PATH}/active");
        let rules: Listing<AssignmentRule> =
            self.http.fetch("list_active_rules", self.http.get(&path)).await?;
        Ok(rules.into_vec())
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<AssignmentRule, ClientError> {
        let path = format!("{RULES_PATH}/{id}");
        self.http.fetch("get_rule", self.http.get(&path)).await
    }

    pub async fn create(&self, draft: &RuleDraft) -> Result<AssignmentRule, ClientError> {
        self.http
            .fetch("create_rule", self.http.post(RULES_PATH).json(draft))
            .await
    }

    pub async fn update(&self, id: DbId, draft: &RuleDraft) -> Result<AssignmentRule, ClientError> {
        let path = format!("{RULES_PATH}/{id}");
        self.http
            .fetch("update_rule", self.http.put(&path).json(draft))
            .await
    }

    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let path = format!("{RULES_PATH}/{id}");
        self.http.execute("delete_rule", self.http.delete(&path)).await
    }
}
