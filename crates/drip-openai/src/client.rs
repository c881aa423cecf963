use async_stream::try_stream;

use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client as HttpClient,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};

use crate::{
    api_v1::{ChatCompletionChunkResponse, ChatCompletionRequest, ChatCompletionStreamEvent},
    error::OpenAiError,
    sse::{self, SseFrame},
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Minimal HTTP client for OpenAI’s *chat/completions* endpoint.
///
/// * Streaming only: one request ▶ a stream of chunk responses.
/// * Shares a single `reqwest::Client`, so cloning `OpenAiClient` is cheap.
#[derive(Clone)]
pub(crate) struct OpenAiClient {
    api_key: String,
    http: HttpClient,
    base: String,
}

impl OpenAiClient {
    pub(crate) fn with_http(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            api_key: api_key.into(),
            http,
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    fn headers(&self) -> Result<HeaderMap, OpenAiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    /// Perform a **streaming** chat completion.
    ///
    /// Nothing is sent until the returned stream is first polled. Dropping
    /// the stream drops the response body and frees the connection.
    pub(crate) fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> impl Stream<Item = Result<ChatCompletionChunkResponse, OpenAiError>> + '_ {
        request.stream = Some(true);
        let url = format!("{}/chat/completions", self.base);

        try_stream! {
            let headers = self.headers()?;

            #[cfg(feature = "tracing")]
            tracing::debug!(%url, model = %request.model, "opening chat completion stream");

            let resp = self.http.post(url).headers(headers).json(&request).send().await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();

                #[cfg(feature = "tracing")]
                tracing::warn!(%status, "chat completion stream rejected");

                return Err(OpenAiError::Api { status, body })?;
            }

            let frames = sse::frames(resp.bytes_stream());
            futures_util::pin_mut!(frames);

            while let Some(frame) = frames.next().await {
                let data = match frame? {
                    SseFrame::Done => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!("chat completion stream finished");
                        return;
                    }
                    SseFrame::Data(data) => data,
                };

                match serde_json::from_str::<ChatCompletionStreamEvent>(&data)? {
                    ChatCompletionStreamEvent::Chunk(chunk) => yield chunk,
                    ChatCompletionStreamEvent::Error { error } => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(kind = ?error.kind, "chat completion stream reported an error");

                        return Err(OpenAiError::from(error))?;
                    }
                }
            }
        }
    }
}
