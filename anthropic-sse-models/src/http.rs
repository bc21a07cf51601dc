//! Adapters from `reqwest` responses.
//!
//! The caller owns the request: building it, sending it, and checking the
//! status. These functions only take over the body of a successful
//! streaming response.

use crate::anthropic::{self, CompletionStream, MessageStream};
use anthropic_sse_core::{SseMessage, StreamSettings};
use anthropic_sse_streaming::{sse_response, StreamError, StreamResponse};
use bytes::Bytes;
use futures::{Stream, StreamExt};

/// Body of a response as a stream of byte chunks with transport errors
/// wrapped in [`StreamError::Transport`].
pub fn body_stream(
    response: reqwest::Response,
) -> impl Stream<Item = Result<Bytes, StreamError>> + Send + 'static {
    response
        .bytes_stream()
        .map(|chunk| chunk.map_err(StreamError::transport))
}

/// Decode a response into raw SSE messages using `settings`.
pub fn response_messages(
    response: reqwest::Response,
    settings: StreamSettings,
) -> StreamResponse<SseMessage> {
    tracing::debug!(url = %response.url(), status = %response.status(), "streaming SSE response");
    sse_response(body_stream(response), settings)
}

/// Decode a Messages API response.
pub fn message_stream(response: reqwest::Response) -> MessageStream {
    anthropic::message_stream(body_stream(response))
}

/// Decode a legacy Text Completions response.
pub fn completion_stream(response: reqwest::Response) -> CompletionStream {
    anthropic::completion_stream(body_stream(response))
}
