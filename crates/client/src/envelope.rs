//! Response envelope shared by every CRM API endpoint.
//!
//! All responses use `{ "success": bool, "data": T, "error"?: string,
//! "message"?: string }`. List endpoints may wrap their rows in an object
//! (`{ "leads": [...] }`); [`Listing`] accepts both forms.

use serde::Deserialize;

/// Standard `{ success, data, error, message }` envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// The server's explanation, preferring `error` over `message`.
    pub fn reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Error body of a non-2xx response. Only the text fields matter.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// A list payload, either bare or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "leads", alias = "users", alias = "rules", alias = "history")]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(v) | Listing::Wrapped { items: v } => v,
        }
    }
}
