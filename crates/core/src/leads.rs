//! Lead and user read models consumed by assignment workflows.

use serde::{Deserialize, Serialize};

use crate::roles::is_assignable_role;
use crate::types::{DbId, Timestamp};

/// Well-known lead status names.
pub const LEAD_STATUS_NEW: &str = "new";
pub const LEAD_STATUS_CONTACTED: &str = "contacted";
pub const LEAD_STATUS_QUALIFIED: &str = "qualified";
pub const LEAD_STATUS_WON: &str = "won";
pub const LEAD_STATUS_LOST: &str = "lost";

/// A lead as listed by `GET /leads`.
///
/// The leads API answers in snake_case while the assignment endpoints echo
/// leads in camelCase; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: DbId,
    #[serde(default, alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, alias = "lead_status")]
    pub status: Option<String>,
    #[serde(default, alias = "lead_source", alias = "leadSource")]
    pub source: Option<String>,
    #[serde(default, alias = "leadScore")]
    pub lead_score: Option<f64>,
    #[serde(default, alias = "assignedTo")]
    pub assigned_to: Option<DbId>,
    #[serde(default, alias = "assignedUserName")]
    pub assigned_user_name: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<Timestamp>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}

/// A CRM user as listed by `GET /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Users who may receive leads, in their original order.
pub fn assignable_users(users: Vec<User>) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| is_assignable_role(&u.role))
        .collect()
}
