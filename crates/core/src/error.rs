use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Closed set of error categories callers branch on.
///
/// Every error type in the workspace maps onto one of these so that
/// presentation code can pattern-match on the kind instead of inspecting
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected, either locally or by the server (400/422).
    Validation,
    /// The addressed resource does not exist (404).
    NotFound,
    /// The write conflicts with current server state (409).
    Conflict,
    /// The server failed or answered with something unusable.
    Server,
    /// The request never produced a response (connect, DNS, timeout).
    Network,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::Conflict(_) => ErrorKind::Conflict,
            CoreError::Internal(_) => ErrorKind::Server,
        }
    }
}
