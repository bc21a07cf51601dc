//! Lazy, single-pass delivery of decoded values.
//!
//! [`StreamResponse`] owns the whole pipeline, transport included. It hands
//! out one element per poll and releases the pipeline as soon as the stream
//! is exhausted, fails, or is dropped, whichever comes first.

use crate::decoder::SseMessageStream;
use crate::dispatch::EventDispatcher;
use crate::error::{StreamError, StreamResult};
use crate::lines::LineStream;
use crate::typed::map_json;
use anthropic_sse_core::{SseMessage, StreamSettings};
use futures::stream::{BoxStream, FusedStream};
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::fmt;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

type CloseHook = Box<dyn FnOnce() + Send + 'static>;

/// A lazy stream of `T` backed by a live response body.
pub struct StreamResponse<T> {
    inner: Option<BoxStream<'static, StreamResult<T>>>,
    on_close: Option<CloseHook>,
}

impl<T> StreamResponse<T> {
    /// Wrap a stream.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = StreamResult<T>> + Send + 'static,
    {
        Self {
            inner: Some(Box::pin(stream)),
            on_close: None,
        }
    }

    fn closed() -> Self {
        Self {
            inner: None,
            on_close: None,
        }
    }

    /// Register a hook run exactly once when the stream is released.
    ///
    /// Hooks registered on an already released stream run immediately.
    #[must_use]
    pub fn on_close<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_closed() {
            hook();
            return self;
        }

        self.on_close = Some(match self.on_close.take() {
            Some(previous) => Box::new(move || {
                previous();
                hook();
            }),
            None => Box::new(hook),
        });
        self
    }

    /// Whether the underlying pipeline has been released.
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Release the underlying pipeline now. Further polls yield `None`.
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            tracing::debug!("released SSE response stream");
        }
        if let Some(hook) = self.on_close.take() {
            hook();
        }
    }

    /// Map every element, ending the stream on the first mapping failure.
    pub fn map<U, F>(mut self, mut f: F) -> StreamResponse<U>
    where
        T: 'static,
        U: 'static,
        F: FnMut(T) -> StreamResult<U> + Send + 'static,
    {
        let mut mapped = match self.inner.take() {
            Some(inner) => StreamResponse::new(inner.map(move |item| item.and_then(&mut f))),
            None => StreamResponse::closed(),
        };
        mapped.on_close = self.on_close.take();
        mapped
    }
}

impl StreamResponse<SseMessage> {
    /// Deserialize every message payload into `T`.
    pub fn map_json<T>(self) -> StreamResponse<T>
    where
        T: DeserializeOwned + 'static,
    {
        self.map(|message| map_json(&message))
    }
}

impl<T> Stream for StreamResponse<T> {
    type Item = StreamResult<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(inner) = self.inner.as_mut() else {
            return Poll::Ready(None);
        };

        let item = ready!(inner.as_mut().poll_next(cx));
        if !matches!(item, Some(Ok(_))) {
            self.close();
        }
        Poll::Ready(item)
    }
}

impl<T> FusedStream for StreamResponse<T> {
    fn is_terminated(&self) -> bool {
        self.is_closed()
    }
}

impl<T> Drop for StreamResponse<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T> fmt::Debug for StreamResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResponse")
            .field("closed", &self.is_closed())
            .field("has_close_hook", &self.on_close.is_some())
            .finish()
    }
}

/// Build the full pipeline over a chunked response body: lines, SSE
/// messages, then dispatch according to `settings.policy`.
pub fn sse_response<S, B, E>(body: S, settings: StreamSettings) -> StreamResponse<SseMessage>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]>,
    E: Into<StreamError>,
{
    let lines = LineStream::with_max_line_length(body, settings.max_line_length);
    let messages = SseMessageStream::new(lines);
    StreamResponse::new(EventDispatcher::new(messages, settings.policy))
}
