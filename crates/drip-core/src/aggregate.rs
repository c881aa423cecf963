//! Lazy flattening of a chunk stream into a stream of choices.
//!
//! A streamed completion arrives as [`ChatChunk`]s, each holding zero or more
//! [`ChatChoice`]s. Most consumers only care about the choices, in order, so
//! [`ChoiceStream`] concatenates them:
//!
//! ```text
//! chunks:  [c0, c1]  []  [c2]  ...
//! choices:  c0, c1,       c2,  ...
//! ```
//!
//! The source is pulled one chunk at a time and only once the choices of the
//! current chunk are used up, so asking for the first choice of an unbounded
//! stream reads exactly as many chunks as it takes to find one.
//!
//! ```rust
//! use drip_core::aggregate::first_delta;
//! use drip_core::error::DripError;
//! use drip_core::generic::{ChatChoice, ChatChunk, ChatDelta, Role};
//! use futures_util::stream;
//!
//! # futures_util::FutureExt::now_or_never(async {
//! let chunks = stream::iter(vec![
//!     Ok::<_, DripError>(ChatChunk::new(vec![])),
//!     Ok(ChatChunk::new(vec![ChatChoice::new(0, ChatDelta::role(Role::Assistant))])),
//! ]);
//!
//! let delta = first_delta(chunks).await?;
//! assert_eq!(delta.role, Some(Role::Assistant));
//! # Ok::<_, DripError>(())
//! # }).unwrap().unwrap();
//! ```
use std::{
    pin::Pin,
    task::{Context, Poll, ready},
    vec,
};

use futures_core::{FusedStream, Stream};
use futures_util::{StreamExt, TryStreamExt, future};

use crate::{
    error::{DripError, Result},
    generic::{ChatChoice, ChatChunk, ChatDelta},
};

/// Stream adapter yielding every choice of every chunk of `S`, in arrival
/// order.
///
/// Errors from the source are yielded as-is, in the position they occurred.
/// The source is dropped as soon as it ends or the `ChoiceStream` itself is
/// dropped, whichever comes first.
#[derive(Debug)]
pub struct ChoiceStream<S> {
    /// `None` once the source has ended.
    chunks: Option<S>,
    /// Remaining choices of the chunk most recently pulled.
    current: vec::IntoIter<ChatChoice>,
}

impl<S> ChoiceStream<S>
where
    S: Stream<Item = Result<ChatChunk>> + Unpin,
{
    pub fn new(chunks: S) -> Self {
        Self {
            chunks: Some(chunks),
            current: Vec::new().into_iter(),
        }
    }

    /// Resolve to the first choice, then drop the stream and with it the
    /// source.
    ///
    /// # Errors
    ///
    /// * [`DripError::EmptyStream`] – the source ended without a choice.
    /// * any error the source yields before the first choice.
    pub async fn first(mut self) -> Result<ChatChoice> {
        match self.next().await {
            Some(choice) => choice,
            None => Err(DripError::EmptyStream),
        }
    }

    /// Text fragments of completion `index`, skipping choices for other
    /// completions and choices without content.
    pub fn content_deltas(self, index: u32) -> impl Stream<Item = Result<String>> {
        self.try_filter_map(move |choice| {
            let text = if choice.index == index {
                choice.delta.content.filter(|text| !text.is_empty())
            } else {
                None
            };
            future::ready(Ok(text))
        })
    }
}

impl<S> Stream for ChoiceStream<S>
where
    S: Stream<Item = Result<ChatChunk>> + Unpin,
{
    type Item = Result<ChatChoice>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(choice) = this.current.next() {
                return Poll::Ready(Some(Ok(choice)));
            }

            let Some(chunks) = this.chunks.as_mut() else {
                return Poll::Ready(None);
            };

            match ready!(Pin::new(chunks).poll_next(cx)) {
                Some(Ok(chunk)) => this.current = chunk.into_choices().into_iter(),
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => {
                    this.chunks = None;
                    return Poll::Ready(None);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.current.len();
        match self.chunks {
            Some(_) => (buffered, None),
            None => (buffered, Some(buffered)),
        }
    }
}

impl<S> FusedStream for ChoiceStream<S>
where
    S: Stream<Item = Result<ChatChunk>> + Unpin,
{
    fn is_terminated(&self) -> bool {
        self.chunks.is_none() && self.current.len() == 0
    }
}

/// Shorthand for [`ChoiceStream::new`].
pub fn flatten_choices<S>(chunks: S) -> ChoiceStream<S>
where
    S: Stream<Item = Result<ChatChunk>> + Unpin,
{
    ChoiceStream::new(chunks)
}

/// First choice of a chunk stream. See [`ChoiceStream::first`].
pub async fn first_choice<S>(chunks: S) -> Result<ChatChoice>
where
    S: Stream<Item = Result<ChatChunk>> + Unpin,
{
    ChoiceStream::new(chunks).first().await
}

/// Delta of the first choice of a chunk stream.
pub async fn first_delta<S>(chunks: S) -> Result<ChatDelta>
where
    S: Stream<Item = Result<ChatChunk>> + Unpin,
{
    first_choice(chunks).await.map(|choice| choice.delta)
}

/// Same flattening over chunks that were already collected.
pub fn choices_of(chunks: &[ChatChunk]) -> impl Iterator<Item = &ChatChoice> + '_ {
    chunks.iter().flat_map(|chunk| chunk.choices().iter())
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    };

    use futures_util::stream;

    use super::*;
    use crate::generic::Role;

    fn choice(index: u32, text: &str) -> ChatChoice {
        ChatChoice::new(index, ChatDelta::text(text))
    }

    /// A chunk holding `count` choices labelled `"{tag}.{i}"`.
    fn chunk(tag: &str, count: u32) -> ChatChunk {
        ChatChunk::new((0..count).map(|i| choice(i, &format!("{tag}.{i}"))).collect())
    }

    fn source(chunks: Vec<ChatChunk>) -> impl Stream<Item = Result<ChatChunk>> + Unpin {
        stream::iter(chunks.into_iter().map(Ok).collect::<Vec<_>>())
    }

    struct Tracked<S> {
        inner: S,
        dropped: Arc<AtomicBool>,
    }

    impl<S: Stream + Unpin> Stream for Tracked<S> {
        type Item = S::Item;

        fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
            Pin::new(&mut self.inner).poll_next(cx)
        }
    }

    impl<S> Drop for Tracked<S> {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn concatenates_choices_in_arrival_order() {
        let cases = vec![
            vec![],
            vec![chunk("a", 1)],
            vec![chunk("a", 3), chunk("b", 1)],
            vec![chunk("a", 0), chunk("b", 2), chunk("c", 0), chunk("d", 4)],
        ];

        for chunks in cases {
            let expected: Vec<ChatChoice> = choices_of(&chunks).cloned().collect();
            let got: Vec<ChatChoice> = ChoiceStream::new(source(chunks))
                .try_collect()
                .await
                .unwrap();
            assert_eq!(got, expected);
        }
    }

    #[tokio::test]
    async fn empty_chunks_contribute_nothing() {
        let chunks = vec![chunk("a", 2), chunk("b", 0), chunk("c", 1)];

        let got: Vec<ChatChoice> = ChoiceStream::new(source(chunks.clone()))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(got.len(), 3);
        assert_eq!(got[2], chunks[2].choices()[0]);
        assert_eq!(got[2].delta.content.as_deref(), Some("c.0"));
    }

    #[tokio::test]
    async fn first_choice_of_empty_stream_fails() {
        let err = first_choice(source(vec![])).await.unwrap_err();
        assert!(err.is_empty_stream());

        let err = first_choice(source(vec![chunk("a", 0), chunk("b", 0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, DripError::EmptyStream));
    }

    #[tokio::test]
    async fn first_choice_skips_leading_empty_chunks() {
        let delta = first_delta(source(vec![chunk("a", 0), chunk("b", 2)]))
            .await
            .unwrap();
        assert_eq!(delta.content.as_deref(), Some("b.0"));
    }

    #[tokio::test]
    async fn first_choice_pulls_a_single_chunk_from_unbounded_source() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulled);
        let unbounded = stream::repeat_with(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, DripError>(chunk(&n.to_string(), 1))
        });

        let choice = first_choice(unbounded).await.unwrap();

        assert_eq!(choice.delta.content.as_deref(), Some("0.0"));
        assert_eq!(pulled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn first_choice_releases_source() {
        let dropped = Arc::new(AtomicBool::new(false));
        let tracked = Tracked {
            inner: stream::repeat_with(|| Ok::<_, DripError>(chunk("x", 1))),
            dropped: Arc::clone(&dropped),
        };

        first_choice(tracked).await.unwrap();
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn abandoning_the_stream_releases_source() {
        let dropped = Arc::new(AtomicBool::new(false));
        let tracked = Tracked {
            inner: stream::repeat_with(|| Ok::<_, DripError>(chunk("x", 2))),
            dropped: Arc::clone(&dropped),
        };

        let mut choices = ChoiceStream::new(tracked);
        choices.next().await.unwrap().unwrap();
        assert!(!dropped.load(Ordering::SeqCst));

        drop(choices);
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn source_errors_pass_through() {
        let chunks = stream::iter(vec![
            Ok(chunk("a", 1)),
            Err(DripError::Invalid("connection reset".into())),
            Ok(chunk("b", 1)),
        ]);
        let mut choices = ChoiceStream::new(chunks);

        assert!(choices.next().await.unwrap().is_ok());
        match choices.next().await {
            Some(Err(DripError::Invalid(msg))) => assert_eq!(msg, "connection reset"),
            other => panic!("expected source error, got {other:?}"),
        }
        assert!(choices.next().await.unwrap().is_ok());
        assert!(choices.next().await.is_none());
    }

    #[tokio::test]
    async fn first_choice_propagates_leading_error() {
        let chunks = stream::iter(vec![
            Ok(chunk("a", 0)),
            Err(DripError::Invalid("unauthorized".into())),
        ]);

        let err = first_choice(chunks).await.unwrap_err();
        assert!(matches!(err, DripError::Invalid(msg) if msg == "unauthorized"));
    }

    #[tokio::test]
    async fn terminated_stream_never_polls_source_again() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let mut items = vec![Ok::<_, DripError>(chunk("a", 1))].into_iter();
        let chunks = stream::poll_fn(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Poll::Ready(items.next())
        });

        let mut choices = ChoiceStream::new(chunks);
        assert!(choices.next().await.is_some());
        assert!(choices.next().await.is_none());
        assert!(choices.is_terminated());

        let seen = polls.load(Ordering::SeqCst);
        assert!(choices.next().await.is_none());
        assert_eq!(polls.load(Ordering::SeqCst), seen);
    }

    #[test]
    fn materialised_aggregation_is_repeatable() {
        let chunks = vec![chunk("a", 2), chunk("b", 0), chunk("c", 3)];

        let first: Vec<&ChatChoice> = choices_of(&chunks).collect();
        let second: Vec<&ChatChoice> = choices_of(&chunks).collect();

        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn content_deltas_follow_one_completion() {
        let chunks = vec![
            ChatChunk::new(vec![
                ChatChoice::new(0, ChatDelta::role(Role::Assistant).with_content("")),
                ChatChoice::new(1, ChatDelta::role(Role::Assistant)),
            ]),
            ChatChunk::new(vec![choice(0, "Step "), choice(1, "Go ")]),
            ChatChunk::new(vec![]),
            ChatChunk::new(vec![choice(0, "outside.")]),
        ];

        let text: Vec<String> = ChoiceStream::new(source(chunks))
            .content_deltas(0)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(text.concat(), "Step outside.");
    }
}
