//! Combinators for assembling SSE pipelines from any stream.

use crate::decoder::SseMessageStream;
use crate::dispatch::EventDispatcher;
use crate::error::{StreamError, StreamResult};
use crate::lines::LineStream;
use crate::response::StreamResponse;
use crate::typed::JsonStream;
use anthropic_sse_core::{DispatchPolicy, SseMessage};
use futures::Stream;

/// Extension trait chaining the pipeline stages.
pub trait SseStreamExt: Stream + Sized {
    /// Split a byte-chunk stream into lines.
    fn sse_lines<B, E>(self) -> LineStream<Self>
    where
        Self: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: Into<StreamError>,
    {
        LineStream::new(self)
    }

    /// Decode a line stream into SSE messages.
    fn sse_messages<L, E>(self) -> SseMessageStream<Self>
    where
        Self: Stream<Item = Result<L, E>>,
        L: AsRef<str>,
        E: Into<StreamError>,
    {
        SseMessageStream::new(self)
    }

    /// Filter messages through a dispatch policy.
    fn dispatch(self, policy: DispatchPolicy) -> EventDispatcher<Self>
    where
        Self: Stream<Item = StreamResult<SseMessage>>,
    {
        EventDispatcher::new(self, policy)
    }

    /// Deserialize message payloads into `T`.
    fn json<T>(self) -> JsonStream<Self, T>
    where
        Self: Stream<Item = StreamResult<SseMessage>>,
    {
        JsonStream::new(self)
    }

    /// Box the stream into a [`StreamResponse`].
    fn into_response<T>(self) -> StreamResponse<T>
    where
        Self: Stream<Item = StreamResult<T>> + Send + 'static,
    {
        StreamResponse::new(self)
    }
}

impl<S: Stream> SseStreamExt for S {}
