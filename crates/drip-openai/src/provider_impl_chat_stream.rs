use std::{pin::Pin, sync::Arc};

use drip_core::error::{DripError, Result};
use drip_core::generic::ChatChunk;
use drip_core::provider::{ChatCompleteParameters, ChatCompletionClient};
use futures_core::stream::Stream;

use crate::OpenAiAdapter;
use crate::api_v1::{ChatCompletionRequest, StreamOptions};

impl ChatCompletionClient for OpenAiAdapter {
    type ChunkStream<'s>
        = Pin<Box<dyn Stream<Item = Result<ChatChunk>> + Send + 's>>
    where
        Self: 's;

    fn create_streaming_completion<'s>(
        &'s self,
        params: ChatCompleteParameters,
    ) -> Self::ChunkStream<'s> {
        let client = Arc::clone(&self.client);
        let include_usage = self.include_usage;

        Box::pin(async_stream::try_stream! {
            use futures_util::StreamExt;

            let mut request = ChatCompletionRequest::try_from(params)?;
            if include_usage {
                request = request.stream_options(StreamOptions { include_usage: true });
            }

            let stream = client.chat_completion_stream(request);
            futures_util::pin_mut!(stream);

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(DripError::from)?;
                yield ChatChunk::from(chunk);
            }
        })
    }
}
