use drip_core::generic::{self, ChatChoice, ChatChunk, ChatDelta};
use serde::Deserialize;

use super::{chat_completion::MessageRole, common::Usage};
use crate::error::OpenAiError;

/// A delta message as returned by OpenAI when `stream = true`.
#[derive(Debug, Deserialize, Default)]
pub struct ChatCompletionMessageDelta {
    #[serde(default)]
    pub role: Option<MessageRole>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A single streaming choice payload.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunkChoice {
    pub index: u32,
    #[serde(default)]
    pub delta: ChatCompletionMessageDelta,
    pub finish_reason: Option<FinishReason>,
}

/// The outermost object sent by OpenAI for each SSE chunk.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunkResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatCompletionChunkChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Body of an `{"error": {...}}` event.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StreamErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

/// Anything a `data:` line may carry: a chunk, or an error reported in its
/// place after the stream has started.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChatCompletionStreamEvent {
    Error { error: StreamErrorBody },
    Chunk(ChatCompletionChunkResponse),
}

impl From<StreamErrorBody> for OpenAiError {
    fn from(value: StreamErrorBody) -> Self {
        OpenAiError::Stream {
            message: value.message,
            kind: value.kind,
            code: value.code,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    FunctionCall,
    #[serde(other)]
    Other,
}

impl FinishReason {
    pub fn to_generic(self) -> Option<generic::FinishReason> {
        match self {
            FinishReason::Stop => Some(generic::FinishReason::Stop),
            FinishReason::Length => Some(generic::FinishReason::Length),
            FinishReason::ContentFilter => Some(generic::FinishReason::ContentFilter),
            FinishReason::ToolCalls | FinishReason::FunctionCall => {
                Some(generic::FinishReason::ToolCalls)
            }
            FinishReason::Other => None,
        }
    }
}

impl From<ChatCompletionChunkChoice> for ChatChoice {
    fn from(value: ChatCompletionChunkChoice) -> Self {
        ChatChoice {
            index: value.index,
            delta: ChatDelta {
                role: value.delta.role.and_then(MessageRole::to_generic),
                content: value.delta.content,
            },
            finish_reason: value.finish_reason.and_then(FinishReason::to_generic),
        }
    }
}

impl From<ChatCompletionChunkResponse> for ChatChunk {
    fn from(value: ChatCompletionChunkResponse) -> Self {
        let mut chunk = ChatChunk::new(value.choices.into_iter().map(Into::into).collect());
        if let Some(created) = value.created {
            chunk = chunk.with_created(created);
        }
        if let Some(id) = value.id {
            chunk = chunk.with_id(id);
        }
        if !value.model.is_empty() {
            chunk = chunk.with_model(value.model);
        }
        chunk
    }
}

#[cfg(test)]
mod tests {
    use drip_core::generic::Role;

    use super::*;

    #[test]
    fn converts_wire_chunk_into_ordered_chunk() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "created": 1700000000,
            "model": "gpt-4o",
            "choices": [
                {"index": 1, "delta": {"content": "b"}, "finish_reason": null},
                {"index": 0, "delta": {"role": "assistant", "content": "a"}, "finish_reason": "stop"}
            ]
        }"#;

        let wire: ChatCompletionChunkResponse = serde_json::from_str(raw).unwrap();
        let chunk = ChatChunk::from(wire);

        assert_eq!(chunk.id.as_deref(), Some("chatcmpl-1"));
        assert_eq!(chunk.model.as_deref(), Some("gpt-4o"));
        assert_eq!(chunk.created, Some(1_700_000_000));

        let choices = chunk.choices();
        assert_eq!(choices[0].index, 0);
        assert_eq!(choices[0].delta.role, Some(Role::Assistant));
        assert_eq!(choices[0].finish_reason, Some(generic::FinishReason::Stop));
        assert_eq!(choices[1].delta.content.as_deref(), Some("b"));
    }

    #[test]
    fn optional_fields_stay_unset() {
        let raw = r#"{"choices":[{"index":0,"delta":{"content":"hi"},"finish_reason":"eos"}]}"#;

        let wire: ChatCompletionChunkResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(wire.choices[0].finish_reason, Some(FinishReason::Other));

        let chunk = ChatChunk::from(wire);
        assert_eq!(chunk.created, None);
        assert_eq!(chunk.id, None);
        assert_eq!(chunk.model, None);
        assert_eq!(chunk.choices()[0].finish_reason, None);
    }

    #[test]
    fn error_event_is_not_a_chunk() {
        let raw = r#"{"error":{"message":"The server had an error while processing your request.","type":"server_error","code":null}}"#;

        let event: ChatCompletionStreamEvent = serde_json::from_str(raw).unwrap();
        let ChatCompletionStreamEvent::Error { error } = event else {
            panic!("expected an error event");
        };
        assert_eq!(error.kind.as_deref(), Some("server_error"));

        let err = OpenAiError::from(error);
        assert!(err.to_string().contains("server_error"));
        assert!(serde_json::from_str::<ChatCompletionChunkResponse>(raw).is_err());
    }

    #[test]
    fn chunk_event_parses_as_chunk() {
        let raw = r#"{"id":"c","created":1,"model":"m","choices":[]}"#;

        let event: ChatCompletionStreamEvent = serde_json::from_str(raw).unwrap();
        assert!(matches!(event, ChatCompletionStreamEvent::Chunk(_)));
    }

    #[test]
    fn usage_chunk_has_no_choices() {
        let raw = r#"{"id":"chatcmpl-1","object":"chat.completion.chunk","created":1,
            "model":"gpt-4o","choices":[],
            "usage":{"prompt_tokens":9,"completion_tokens":12,"total_tokens":21}}"#;

        let wire: ChatCompletionChunkResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(wire.usage.map(|u| u.total_tokens), Some(21));
        assert!(ChatChunk::from(wire).is_empty());
    }
}
