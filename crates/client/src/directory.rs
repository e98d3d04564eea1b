//! Lead and user listings (`/leads`, `/users`).

use serde::Serialize;

use leadflow_core::leads::{Lead, User};
use leadflow_core::types::DbId;

use crate::envelope::Listing;
use crate::error::ClientError;
use crate::http::CrmClient;

/// Server-side filters for `GET /leads`. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Read access to the lead and user collections.
#[derive(Clone)]
pub struct Directory {
    http: CrmClient,
}

impl Directory {
    pub fn new(http: CrmClient) -> Self {
        Self { http }
    }

    pub async fn list_leads(&self, query: &LeadQuery) -> Result<Vec<Lead>, ClientError> {
        let leads: Listing<Lead> = self
            .http
            .fetch("list_leads", self.http.get("/leads").query(query))
            .await?;
        Ok(leads.into_vec())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let users: Listing<User> = self
            .http
            .fetch("list_users", self.http.get("/users"))
            .await?;
        Ok(users.into_vec())
    }
}
