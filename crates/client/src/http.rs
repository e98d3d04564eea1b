//! HTTP transport for the CRM REST API.
//!
//! [`CrmClient`] owns a pooled [`reqwest::Client`], the API root and the
//! optional bearer token. Every request goes through [`CrmClient::fetch`]
//! or [`CrmClient::execute`], which unwrap the response envelope and log
//! any failure once before handing it to the caller.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::assignments::AssignmentOperations;
use crate::config::ClientConfig;
use crate::directory::Directory;
use crate::envelope::{Envelope, ErrorBody};
use crate::error::ClientError;
use crate::rules::RuleRepository;

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for a CRM API root. Cheap to clone.
#[derive(Clone)]
pub struct CrmClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl CrmClient {
    /// Create a client for an API root, e.g. `http://host:5000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for sharing a connection pool).
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_url,
            token: None,
        }
    }

    /// Build a client from loaded configuration, applying the request
    /// timeout and bearer token.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let mut crm = Self::with_client(client, config.api_url.clone());
        crm.token = config.api_token.clone();
        Ok(crm)
    }

    /// Attach a bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `/assignments/rules` CRUD.
    pub fn rules(&self) -> RuleRepository {
        RuleRepository::new(self.clone())
    }

    /// `/assignments/*` lead operations and queries.
    pub fn assignments(&self) -> AssignmentOperations {
        AssignmentOperations::new(self.clone())
    }

    /// `/leads` and `/users` listings.
    pub fn directory(&self) -> Directory {
        Directory::new(self.clone())
    }

    // ---- request helpers ----

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = uuid::Uuid::now_v7().to_string();
        let builder = self
            .client
            .request(method, format!("{}{}", self.api_url, path))
            .header(REQUEST_ID_HEADER, request_id);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send a request and return the envelope's `data`.
    ///
    /// A successful envelope without `data` is a [`ClientError::Decode`].
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let result = Self::send::<T>(request).await.and_then(|data| {
            data.ok_or_else(|| ClientError::Decode("response envelope has no data".to_string()))
        });
        Self::log_outcome(operation, result)
    }

    /// Send a request and return the envelope's `data`, or `T::default()`
    /// when the server sends none (summaries of fire-and-confirm actions).
    pub(crate) async fn fetch_or_default<T: DeserializeOwned + Default>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let result = Self::send::<T>(request).await.map(Option::unwrap_or_default);
        Self::log_outcome(operation, result)
    }

    /// Send a request whose response data is not needed.
    pub(crate) async fn execute(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<(), ClientError> {
        let result = Self::send::<IgnoredAny>(request).await.map(|_| ());
        Self::log_outcome(operation, result)
    }

    // ---- private helpers ----

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<Option<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_text(status, &body),
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;

        if !envelope.success {
            let reason = envelope
                .reason()
                .unwrap_or("request was not successful")
                .to_string();
            return Err(ClientError::Rejected(reason));
        }
        Ok(envelope.data)
    }

    fn log_outcome<T>(
        operation: &'static str,
        result: Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        match &result {
            Ok(_) => tracing::debug!(operation, "CRM API call succeeded"),
            Err(e) => tracing::error!(operation, kind = ?e.kind(), error = %e, "CRM API call failed"),
        }
        result
    }
}

/// Extract the most useful error text from a non-2xx body.
fn error_text(status: reqwest::StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(text) = parsed.error.or(parsed.message) {
            return text;
        }
    }
    let raw = String::from_utf8_lossy(body).trim().to_string();
    if raw.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("<unreadable body>")
            .to_string()
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_prefers_envelope_fields() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            error_text(status, br#"{"success":false,"error":"Invalid lead ids"}"#),
            "Invalid lead ids"
        );
        assert_eq!(
            error_text(status, br#"{"message":"Rule name taken"}"#),
            "Rule name taken"
        );
    }

    #[test]
    fn error_text_falls_back_to_body_then_reason() {
        assert_eq!(
            error_text(reqwest::StatusCode::BAD_GATEWAY, b"upstream down\n"),
            "upstream down"
        );
        assert_eq!(error_text(reqwest::StatusCode::NOT_FOUND, b""), "Not Found");
    }

    #[test]
    fn trailing_slash_is_dropped_from_root() {
        let client = CrmClient::new("http://localhost:5000/api/");
        assert_eq!(client.api_url(), "http://localhost:5000/api");
    }
}
