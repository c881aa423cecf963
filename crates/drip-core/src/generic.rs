//! Provider-agnostic request and response types.
//!
//! A request is a list of [`Message`]s. A streamed response arrives as a
//! sequence of [`ChatChunk`]s, each carrying zero or more [`ChatChoice`]s,
//! and every choice carries the incremental [`ChatDelta`] for one of the
//! parallel completions.
//!
//! Backends convert their wire structs into these types so the aggregator in
//! [`crate::aggregate`] never sees provider specifics.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single chat message. Built once per request and never mutated.
///
/// ```rust
/// use drip_core::generic::{Message, Role};
///
/// let msg = Message::user("can you please tell me how to touch grass");
/// assert_eq!(msg.role(), Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Chat roles.
///
/// `Display` renders the lowercase wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Global behaviour and style guidelines.
    System,
    /// Messages produced by the model.
    Assistant,
    /// Messages originating from the human user.
    User,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::Assistant => write!(f, "assistant"),
            Role::User => write!(f, "user"),
        }
    }
}

/// One network-delivered unit of a streamed completion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatChunk {
    pub id: Option<String>,
    pub model: Option<String>,
    pub created: Option<i64>,
    // Private so the ascending index order established in `new` holds.
    choices: Vec<ChatChoice>,
}

impl ChatChunk {
    /// Build a chunk, ordering `choices` by index. The sort is stable, so
    /// choices sharing an index keep their arrival order.
    pub fn new(mut choices: Vec<ChatChoice>) -> Self {
        choices.sort_by_key(|choice| choice.index);
        Self {
            id: None,
            model: None,
            created: None,
            choices,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_created(mut self, created: i64) -> Self {
        self.created = Some(created);
        self
    }

    pub fn choices(&self) -> &[ChatChoice] {
        &self.choices
    }

    pub fn into_choices(self) -> Vec<ChatChoice> {
        self.choices
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// One candidate completion's fragment within a chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatChoice {
    /// Which parallel completion (`n > 1`) this fragment belongs to.
    pub index: u32,
    pub delta: ChatDelta,
    pub finish_reason: Option<FinishReason>,
}

impl ChatChoice {
    pub fn new(index: u32, delta: ChatDelta) -> Self {
        Self {
            index,
            delta,
            finish_reason: None,
        }
    }

    pub fn with_finish_reason(mut self, reason: FinishReason) -> Self {
        self.finish_reason = Some(reason);
        self
    }
}

/// Incremental role/text update carried by a [`ChatChoice`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatDelta {
    pub role: Option<Role>,
    pub content: Option<String>,
}

impl ChatDelta {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            role: None,
            content: Some(content.into()),
        }
    }

    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Why a completion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
}
