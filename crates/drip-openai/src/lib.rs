mod adapter;
mod client;
mod model_map;
mod provider_impl_chat_stream;

pub use adapter::{OpenAiAdapter, OpenAiAdapterBuilder};
pub mod api_v1;
pub mod error;
pub mod sse;
