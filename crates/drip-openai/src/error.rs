use drip_core::error::DripError;
use eventsource_stream::EventStreamError;
use reqwest::{StatusCode, header::InvalidHeaderValue};

/// High-level error type covering every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t (de)serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("malformed event stream: {0}")]
    EventStream(#[from] EventStreamError<reqwest::Error>),

    #[error("OpenAI returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// An `{"error": …}` event sent in place of a chunk, mid-stream.
    #[error("OpenAI stream reported {}: {message}", .kind.as_deref().unwrap_or("an error"))]
    Stream {
        message: String,
        kind: Option<String>,
        code: Option<serde_json::Value>,
    },

    #[error("API key is not a valid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

impl From<OpenAiError> for DripError {
    fn from(value: OpenAiError) -> Self {
        DripError::Backend(Box::new(value))
    }
}
