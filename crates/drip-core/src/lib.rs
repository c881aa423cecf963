//! Provider-agnostic building blocks of the **drip** workspace.
//!
//! * [`generic`] – messages, chunks, choices and deltas.
//! * [`provider`] – the [`ChatCompletionClient`](provider::ChatCompletionClient)
//!   trait a backend implements to open a streaming completion.
//! * [`aggregate`] – lazy flattening of a chunk stream into its choices.
//! * [`client`] – [`DripClient`], a thin handle over one backend.
pub mod aggregate;
pub mod client;
pub mod error;
pub mod generic;
pub mod model;
pub mod provider;

pub use client::DripClient;
