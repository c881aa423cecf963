use std::sync::Arc;

use futures_core::stream::Stream;

use crate::{error::Result, generic::ChatChunk, generic::Message, model::Model};

/// A **backend** that opens a streaming chat completion against a concrete
/// provider and hands back the raw chunks as they arrive.
///
/// The returned stream is:
///
/// * **lazy** – no network I/O happens until it is first polled,
/// * **forward-only** and **non-restartable** – once a chunk is yielded it is
///   gone,
/// * **owning** – dropping it releases whatever connection backs it.
///
/// Transport, auth and protocol failures show up as `Err` items; the backend
/// decides whether the stream continues after one.
pub trait ChatCompletionClient: Send + Sync {
    /// Stream of chunks returned by [`Self::create_streaming_completion`].
    type ChunkStream<'s>: Stream<Item = Result<ChatChunk>> + Send + Unpin + 's
    where
        Self: 's;

    /// Start a streaming chat completion.
    fn create_streaming_completion<'s>(
        &'s self,
        params: ChatCompleteParameters,
    ) -> Self::ChunkStream<'s>;
}

impl<C: ChatCompletionClient + ?Sized> ChatCompletionClient for &C {
    type ChunkStream<'s>
        = C::ChunkStream<'s>
    where
        Self: 's;

    fn create_streaming_completion<'s>(
        &'s self,
        params: ChatCompleteParameters,
    ) -> Self::ChunkStream<'s> {
        (**self).create_streaming_completion(params)
    }
}

impl<C: ChatCompletionClient + ?Sized> ChatCompletionClient for Arc<C> {
    type ChunkStream<'s>
        = C::ChunkStream<'s>
    where
        Self: 's;

    fn create_streaming_completion<'s>(
        &'s self,
        params: ChatCompleteParameters,
    ) -> Self::ChunkStream<'s> {
        (**self).create_streaming_completion(params)
    }
}

#[derive(Debug, Clone)]
pub struct ChatCompleteParameters {
    pub messages: Vec<Message>,
    pub model: Model,
    pub temperature: Option<f64>,
}

impl ChatCompleteParameters {
    pub fn new(messages: Vec<Message>, model: impl Into<Model>) -> Self {
        Self {
            messages,
            model: model.into(),
            temperature: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
