use leadflow_client::ClientError;
use leadflow_core::error::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] ClientError),

    /// The session was closed while the operation was in flight; its
    /// result was discarded.
    #[error("Workflow was closed before the operation completed")]
    Cancelled,

    #[error("Workflow is not ready: {0}")]
    NotReady(&'static str),
}

impl WorkflowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::Validation(_) => ErrorKind::Validation,
            WorkflowError::Backend(e) => e.kind(),
            WorkflowError::NotReady(_) => ErrorKind::Validation,
            // Closest category for an aborted request.
            WorkflowError::Cancelled => ErrorKind::Network,
        }
    }

    /// Text suitable for showing next to the workflow.
    pub fn display_message(&self) -> String {
        match self {
            WorkflowError::Backend(e) => e.display_message(),
            other => other.to_string(),
        }
    }
}
