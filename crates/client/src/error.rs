use leadflow_core::error::{CoreError, ErrorKind};

/// Errors from the CRM REST client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CRM API returned a non-2xx status code.
    #[error("CRM API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-supplied error text, or the raw body when there is none.
        message: String,
    },

    /// A 2xx response whose envelope reported `success: false`.
    #[error("CRM API rejected the request: {0}")]
    Rejected(String),

    /// The response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// The client could not be configured.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Normalise into the closed [`ErrorKind`] set.
    ///
    /// - 400 / 422 -> `Validation`, 404 -> `NotFound`, 409 -> `Conflict`.
    /// - Transport failures -> `Network`; undecodable bodies -> `Server`.
    /// - Everything else -> `Server`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Request(e) if e.is_decode() => ErrorKind::Server,
            ClientError::Request(e) => match e.status() {
                Some(status) => kind_for_status(status.as_u16()),
                None => ErrorKind::Network,
            },
            ClientError::Api { status, .. } => kind_for_status(*status),
            ClientError::Rejected(_) | ClientError::Decode(_) => ErrorKind::Server,
            ClientError::Config(_) => ErrorKind::Validation,
        }
    }

    /// Text suitable for an inline error banner.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } | ClientError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

fn kind_for_status(status: u16) -> ErrorKind {
    match status {
        400 | 422 => ErrorKind::Validation,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::Conflict,
        _ => ErrorKind::Server,
    }
}

impl From<ClientError> for CoreError {
    fn from(err: ClientError) -> Self {
        match err.kind() {
            ErrorKind::Validation => CoreError::Validation(err.display_message()),
            ErrorKind::Conflict => CoreError::Conflict(err.display_message()),
            _ => CoreError::Internal(err.to_string()),
        }
    }
}
