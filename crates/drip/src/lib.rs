//! # `drip` – The umbrella crate
//!
//! One import for the whole workspace:
//!
//! | Crate              | What it provides                                                         |
//! |--------------------|--------------------------------------------------------------------------|
//! | **`drip-core`**    | Chunk types, `ChatCompletionClient`, lazy choice aggregation, errors     |
//! | **`drip-openai`**  | HTTP backend for OpenAI-compatible chat completion streams *(optional)*  |
//!
//! The `openai` feature is on by default. Turn it off to stay provider-agnostic
//! and bring your own [`ChatCompletionClient`](provider::ChatCompletionClient).
//! The `tracing` feature makes the OpenAI backend emit `tracing` events.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use drip::{
//!     DripClient,
//!     generic::Message,
//!     model::OpenAiModel,
//!     provider::ChatCompleteParameters,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = drip::openai::OpenAiAdapterBuilder::new_from_env().build()?;
//!     let client = DripClient::new(backend);
//!
//!     let params = ChatCompleteParameters::new(
//!         vec![Message::user("can you please tell me how to touch grass")],
//!         OpenAiModel::Gpt4o,
//!     );
//!     let delta = client.first_delta(params).await?;
//!     println!("{delta:?}");
//!     Ok(())
//! }
//! ```
#![doc(html_root_url = "https://docs.rs/drip/latest")]

pub use drip_core::*;

#[cfg(feature = "openai")]
pub use drip_openai as openai;
