//! Server-sent event framing for the `text/event-stream` body OpenAI streams
//! back.
//!
//! Line splitting, UTF-8 handling and field parsing are left to
//! [`eventsource_stream`]. This module only sorts the parsed events into
//! chunk payloads and the `[DONE]` sentinel. Events without data (comments,
//! bare `retry:` lines) produce nothing.
use eventsource_stream::{Event, EventStreamError, Eventsource};
use futures_core::Stream;
use futures_util::{TryStreamExt, future};

/// Sentinel payload OpenAI sends after the last chunk.
pub const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// Payload of one event. Multiple `data:` lines are joined with `\n`.
    Data(String),
    /// The `[DONE]` sentinel.
    Done,
}

impl SseFrame {
    fn from_event(event: Event) -> Option<Self> {
        let data = event.data;
        if data.trim().is_empty() {
            None
        } else if data.trim() == DONE_MARKER {
            Some(SseFrame::Done)
        } else {
            Some(SseFrame::Data(data))
        }
    }
}

/// Decode a raw body stream into frames. Events split across reads are
/// reassembled; `\n`, `\r\n` and bare `\r` line endings are all accepted.
pub fn frames<S, B, E>(body: S) -> impl Stream<Item = Result<SseFrame, EventStreamError<E>>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    body.eventsource()
        .try_filter_map(|event| future::ready(Ok(SseFrame::from_event(event))))
}
