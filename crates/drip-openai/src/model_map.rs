use std::borrow::Cow;

use drip_core::model::{Model, OpenAiModel};

pub const GPT4_O: &str = "gpt-4o";
pub const GPT4_O_MINI: &str = "gpt-4o-mini";
pub const GPT4_1: &str = "gpt-4.1";
pub const GPT4_1_MINI: &str = "gpt-4.1-mini";
pub const O3_MINI: &str = "o3-mini";
pub const O4_MINI: &str = "o4-mini";

/// OpenAI model id for `model`, or `None` if the name is empty.
pub(crate) fn map_model(model: &Model) -> Option<Cow<'static, str>> {
    let openai_model = match model {
        Model::Custom(custom) if custom.trim().is_empty() => return None,
        Model::Custom(custom) => return Some(custom.clone()),
        Model::OpenAi(openai_model) => openai_model,
    };

    let id = match openai_model {
        OpenAiModel::Gpt4o => GPT4_O,
        OpenAiModel::Gpt4oMini => GPT4_O_MINI,
        OpenAiModel::Gpt4_1 => GPT4_1,
        OpenAiModel::Gpt4_1Mini => GPT4_1_MINI,
        OpenAiModel::O3Mini => O3_MINI,
        OpenAiModel::O4Mini => O4_MINI,
    };
    Some(id.into())
}
