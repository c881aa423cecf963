//! Unified error type exposed by **`drip-core`**.
//!
//! Backend crates convert their internal errors into [`DripError::Backend`]
//! before handing them to the aggregator. The boxed value is the backend's own
//! error, so callers can `downcast_ref` to inspect the transport failure.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DripError>;

#[derive(Debug, Error)]
pub enum DripError {
    /// The first choice was requested from a stream that ended without
    /// delivering a single choice.
    #[error("stream ended before any choice was received")]
    EmptyStream,

    /// The selected backend does not recognise the requested `model`.
    #[error("provider `{provider}` does not support model `{model}`")]
    ModelNotSupported {
        provider: &'static str,
        model: String,
    },

    /// Failure while serialising or deserialising JSON payloads sent to or
    /// received from the provider.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport, auth or protocol failure raised by a backend. Passed through
    /// untouched.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid: {0}")]
    Invalid(String),
}

impl DripError {
    /// Whether this is the [`DripError::EmptyStream`] variant.
    pub fn is_empty_stream(&self) -> bool {
        matches!(self, DripError::EmptyStream)
    }
}
