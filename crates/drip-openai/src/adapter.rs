use std::{env, sync::Arc, time::Duration};

use drip_core::error::{DripError, Result};
use reqwest::Client as HttpClient;

use crate::{client::OpenAiClient, error::OpenAiError};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper that wires the HTTP client into a value implementing
/// [`drip_core::provider::ChatCompletionClient`].
///
/// Holds the API key, the base URL and a shareable, connection-pooled
/// `reqwest::Client`. Construct it with [`OpenAiAdapterBuilder`]; all
/// user-facing functionality sits on [`drip_core::DripClient`] once the
/// adapter is plugged in.
pub struct OpenAiAdapter {
    pub(crate) client: Arc<OpenAiClient>,
    pub(crate) include_usage: bool,
}

impl std::fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAdapter")
            .field("include_usage", &self.include_usage)
            .finish_non_exhaustive()
    }
}

/// Builder for [`OpenAiAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use drip_openai::OpenAiAdapterBuilder;
///
/// let backend = OpenAiAdapterBuilder::new_from_env()
///     .build()
///     .expect("OPENAI_API_KEY must be set");
/// ```
#[derive(Default)]
pub struct OpenAiAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) http: Option<HttpClient>,
    pub(crate) include_usage: bool,
}

impl OpenAiAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-filled from `OPENAI_API_KEY` and, if set, `OPENAI_BASE_URL`.
    ///
    /// Never fails. A missing key only surfaces during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").ok(),
            base_url: env::var("OPENAI_BASE_URL").ok().filter(|url| !url.is_empty()),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the adapter at an OpenAI-compatible endpoint, e.g.
    /// `http://localhost:8080/v1`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Connect timeout for the default HTTP client. Streams may run for a
    /// long time, so there is no overall request timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use a caller-supplied `reqwest::Client` (proxies, custom TLS, …).
    /// Overrides [`Self::with_connect_timeout`].
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Ask the server to append a usage chunk (with no choices) to every
    /// stream.
    pub fn with_include_usage(mut self, include_usage: bool) -> Self {
        self.include_usage = include_usage;
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`DripError::Invalid`] – if the API key is missing.
    /// * [`DripError::Backend`] – if the default HTTP client can't be built.
    pub fn build(self) -> Result<OpenAiAdapter> {
        let api_key = self.api_key.ok_or(DripError::Invalid(
            "missing env variable: `OPENAI_API_KEY`".into(),
        ))?;

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder()
                .connect_timeout(self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT))
                .build()
                .map_err(OpenAiError::from)?,
        };

        Ok(OpenAiAdapter {
            client: Arc::new(OpenAiClient::with_http(api_key, http, self.base_url)),
            include_usage: self.include_usage,
        })
    }
}
