use drip_core::error::DripError;
use drip_core::generic::{Message, Role};
use drip_core::provider::ChatCompleteParameters;
use serde::{Deserialize, Serialize};

use crate::impl_builder_methods;
use crate::model_map::map_model;

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<StreamOptions>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatCompletionMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
            n: None,
            stream: None,
            stream_options: None,
        }
    }
}

impl_builder_methods!(
    ChatCompletionRequest,
    temperature: f64,
    n: i64,
    stream: bool,
    stream_options: StreamOptions
);

impl TryFrom<ChatCompleteParameters> for ChatCompletionRequest {
    type Error = DripError;

    fn try_from(value: ChatCompleteParameters) -> Result<Self, Self::Error> {
        let model = map_model(&value.model).ok_or_else(|| DripError::ModelNotSupported {
            provider: "openai",
            model: value.model.to_string(),
        })?;

        if value.messages.is_empty() {
            return Err(DripError::InvalidRequest(
                "a chat completion needs at least one message".into(),
            ));
        }

        Ok(Self {
            model: model.into_owned(),
            messages: value.messages.into_iter().map(Into::into).collect(),
            temperature: value.temperature,
            n: None,
            stream: None,
            stream_options: None,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    pub include_usage: bool,
}

/// Roles as they appear on the wire. Roles the core model has no notion of
/// (`tool`, `developer`, …) collapse into `Other`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    System,
    Assistant,
    #[serde(other)]
    Other,
}

impl From<Role> for MessageRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System => MessageRole::System,
            Role::Assistant => MessageRole::Assistant,
            Role::User => MessageRole::User,
        }
    }
}

impl MessageRole {
    pub fn to_generic(self) -> Option<Role> {
        match self {
            MessageRole::User => Some(Role::User),
            MessageRole::System => Some(Role::System),
            MessageRole::Assistant => Some(Role::Assistant),
            MessageRole::Other => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

impl From<Message> for ChatCompletionMessage {
    fn from(value: Message) -> Self {
        Self {
            role: value.role().into(),
            content: value.content().to_owned(),
        }
    }
}
