//! Error types shared by every adapter and the facade.

use thiserror::Error;

/// Errors that can occur while dispatching or executing a key-value operation.
#[derive(Debug, Error)]
pub enum KvError {
    // Dispatch errors
    /// The logical backend name is not in the registry.
    #[error("backend \"{0}\" not supported")]
    UnsupportedBackend(String),

    /// The backend is known but its adapter is not available in this build.
    #[error("adapter for backend \"{backend}\" is not available. {hint}")]
    AdapterUnavailable {
        /// The logical backend name.
        backend: String,
        /// Install guidance naming the missing package or feature.
        hint: String,
    },

    // Protocol errors
    /// Basic auth was required but no credential pair could be resolved.
    #[error("auth misconfigured: {0}")]
    AuthMisconfigured(String),

    /// The backend response contradicts the operation contract.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The backend reported a failed operation.
    #[error("operation failed: {message}")]
    OperationFailed {
        /// The message reported by the backend.
        message: String,
        /// Optional underlying cause reported alongside the message.
        detail: Option<String>,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("transport failure (HTTP {status}): {body}")]
    TransportFailure {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// The operation is not supported by this adapter.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    // Input errors
    /// The key could not be parsed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The record payload has the wrong shape.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A patch instruction could not be applied.
    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    // Infrastructure errors
    /// The backend could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The embedded storage engine failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Encoding or decoding a payload failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Adapter options are missing or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl KvError {
    /// Build an [`KvError::OperationFailed`] from a backend message and cause.
    pub fn operation_failed(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
            detail,
        }
    }

    /// The underlying cause reported by the backend, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::OperationFailed { detail, .. } => detail.as_deref(),
            Self::TransportFailure { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Whether this error is [`KvError::NotImplemented`].
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }
}

impl From<serde_json::Error> for KvError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type for key-value operations.
pub type KvResult<T> = Result<T, KvError>;
