//! Unified error handling for furnacectl-core
//!
//! Every provider-facing operation returns [`CoreError`]. The variants mirror
//! the classification the lifecycle workflows care about: "already exists" is
//! the only locally recoverable case, "not found" matters when polling a
//! stack that is being torn down, and everything else is fatal for the
//! current command.

use std::time::Duration;
use thiserror::Error;

/// Core error type for provider operations and workflows
#[derive(Error, Debug)]
pub enum CoreError {
    /// The resource being created already exists; creation is a no-op
    #[error("{resource} already exists")]
    AlreadyExists { resource: String },

    /// The requested resource does not exist
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Classified provider API error
    #[error("provider error {code}: {message}")]
    Api { code: String, message: String },

    /// Transport-level failure (network, auth handshake, timeout in flight)
    #[error("connection error: {0}")]
    Connection(String),

    /// Polling exceeded the configured deadline
    #[error("timed out after {0:?} waiting for target status")]
    TaskTimeout(Duration),

    /// The remote operation reached a terminal failure status
    #[error("operation failed: {0}")]
    TaskFailed(String),

    /// Invalid input before any remote call was made
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if this is a classified "already exists" error
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, CoreError::AlreadyExists { .. })
    }

    /// Returns true if this is a "not found" error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }

    /// Returns true if this is a timeout error
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::TaskTimeout(_))
    }

    /// Returns true if this error is potentially retryable
    ///
    /// Re-running a furnacectl command is always safe (steps are idempotent,
    /// identifiers are re-derived), so this only distinguishes transient
    /// conditions from definite provider rejections.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::Connection(_) | CoreError::TaskTimeout(_)
        )
    }
}
