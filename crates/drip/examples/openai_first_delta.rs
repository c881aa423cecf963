//! # First Delta – Streaming Example
//!
//! Opens a streaming chat completion, flattens the incoming chunks into
//! choices and prints the delta of the very first one. The connection is
//! closed as soon as that delta has arrived.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…      # mandatory
//! export OPENAI_BASE_URL=…        # optional, any OpenAI-compatible endpoint
//! RUST_LOG=drip_openai=debug cargo run -p drip --features tracing --example openai_first_delta
//! ```
//!
//! Pass `--stream` to keep reading and print the whole reply instead.

use drip::openai::OpenAiAdapterBuilder;
use drip::{
    aggregate::ChoiceStream,
    generic::Message,
    model::OpenAiModel,
    provider::{ChatCompleteParameters, ChatCompletionClient as _},
};
use futures_util::StreamExt;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let follow = std::env::args().any(|arg| arg == "--stream");

    // 1. Spin up the OpenAI back-end (needs `OPENAI_API_KEY` in the env).
    let backend = OpenAiAdapterBuilder::new_from_env().build()?;

    // 2. One user message, one model.
    let params = ChatCompleteParameters::new(
        vec![Message::user("can you please tell me how to touch grass")],
        OpenAiModel::Gpt4o,
    );

    // 3. Open the stream. Nothing is sent until the first poll.
    let choices = ChoiceStream::new(backend.create_streaming_completion(params));

    if !follow {
        // 4a. Inspect the first delta and hang up.
        let first = choices.first().await?;
        println!("first delta: {:?}", first.delta);
        return Ok(());
    }

    // 4b. Render the assistant’s output as it flows in.
    let text = choices.content_deltas(0);
    futures_util::pin_mut!(text);

    print!("Assistant: ");
    io::stdout().flush().ok();

    while let Some(fragment) = text.next().await {
        print!("{}", fragment?);
        io::stdout().flush().ok();
    }

    println!();
    Ok(())
}
