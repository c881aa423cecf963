//! Model identifiers.
//!
//! Known OpenAI models get an enum variant so application code never has to
//! spell `"gpt-4o-mini"` by hand. Anything else (self-hosted, beta or
//! compatible endpoints) goes through [`Model::Custom`] verbatim.
//!
//! ```rust
//! use drip_core::model::{Model, OpenAiModel};
//!
//! assert_eq!(Model::from(OpenAiModel::Gpt4oMini), Model::OpenAi(OpenAiModel::Gpt4oMini));
//! assert_eq!(Model::from("gpt4-o"), Model::Custom("gpt4-o".into()));
//! ```
use std::{borrow::Cow, fmt::Display};

/// Universal identifier for an LLM model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Built-in OpenAI models (chat completion API).
    OpenAi(OpenAiModel),
    /// Model id passed to the provider as-is.
    Custom(Cow<'static, str>),
}

impl Model {
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Model::Custom(name.into())
    }
}

/// Models the OpenAI back-end knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenAiModel {
    Gpt4o,
    Gpt4oMini,
    Gpt4_1,
    Gpt4_1Mini,
    O3Mini,
    O4Mini,
}

impl From<OpenAiModel> for Model {
    fn from(val: OpenAiModel) -> Self {
        Model::OpenAi(val)
    }
}

impl From<&'static str> for Model {
    fn from(val: &'static str) -> Self {
        Model::Custom(Cow::Borrowed(val))
    }
}

impl From<String> for Model {
    fn from(val: String) -> Self {
        Model::Custom(Cow::Owned(val))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::OpenAi(model) => write!(f, "{model:?}"),
            Model::Custom(name) => f.write_str(name),
        }
    }
}
