//! Generic, lightweight client bound to a single [`ChatCompletionClient`]
//! backend.
//!
//! The client is **generic over the backend type `B`**, so there is no
//! dynamic dispatch in user code and tests can plug in a fake backend that
//! replays a fixed list of chunks.
//!
//! ```rust
//! use drip_core::{
//!     DripClient,
//!     error::Result,
//!     generic::{ChatChoice, ChatChunk, ChatDelta, Message},
//!     provider::{ChatCompleteParameters, ChatCompletionClient},
//! };
//! use futures_util::stream::{self, Iter};
//!
//! struct Replay(Vec<ChatChunk>);
//!
//! impl ChatCompletionClient for Replay {
//!     type ChunkStream<'s> = Iter<std::vec::IntoIter<Result<ChatChunk>>>;
//!
//!     fn create_streaming_completion<'s>(
//!         &'s self,
//!         _params: ChatCompleteParameters,
//!     ) -> Self::ChunkStream<'s> {
//!         stream::iter(self.0.iter().cloned().map(Ok).collect::<Vec<_>>())
//!     }
//! }
//!
//! # futures_util::FutureExt::now_or_never(async {
//! let client = DripClient::new(Replay(vec![ChatChunk::new(vec![
//!     ChatChoice::new(0, ChatDelta::text("Go outside.")),
//! ])]));
//! let params = ChatCompleteParameters::new(vec![Message::user("touch grass?")], "gpt4-o");
//!
//! let delta = client.first_delta(params).await?;
//! assert_eq!(delta.content.as_deref(), Some("Go outside."));
//! # Ok::<_, drip_core::error::DripError>(())
//! # }).unwrap().unwrap();
//! ```
use std::sync::Arc;

use crate::{
    aggregate::ChoiceStream,
    error::Result,
    generic::ChatDelta,
    provider::{ChatCompleteParameters, ChatCompletionClient},
};

/// A client bound to a single backend.
///
/// Cloning is cheap: the backend sits behind an `Arc`.
#[derive(Debug)]
pub struct DripClient<B> {
    backend: Arc<B>,
}

impl<B> Clone for DripClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> DripClient<B>
where
    B: ChatCompletionClient,
{
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Access the underlying backend (e.g. to tweak provider-specific settings).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Open a streaming completion and flatten its chunks into choices.
    pub fn stream_choices(&self, params: ChatCompleteParameters) -> ChoiceStream<B::ChunkStream<'_>> {
        ChoiceStream::new(self.backend.create_streaming_completion(params))
    }

    /// Open a streaming completion and return the delta of its first choice.
    /// The connection is released once the delta is in hand.
    pub async fn first_delta(&self, params: ChatCompleteParameters) -> Result<ChatDelta> {
        let choice = self.stream_choices(params).first().await?;
        Ok(choice.delta)
    }
}

impl<B: ChatCompletionClient> ChatCompletionClient for DripClient<B> {
    type ChunkStream<'s>
        = B::ChunkStream<'s>
    where
        Self: 's;

    fn create_streaming_completion<'s>(
        &'s self,
        params: ChatCompleteParameters,
    ) -> Self::ChunkStream<'s> {
        self.backend.create_streaming_completion(params)
    }
}
