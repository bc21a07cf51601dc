//! Anthropic streaming surfaces.
//!
//! This module wires the generic SSE pipeline to Anthropic's event
//! vocabulary:
//!
//! - [`stream_policy`]: the event table shared by the Messages and legacy
//!   Text Completions streams
//! - [`message_stream`]: a body of Messages API events as
//!   [`MessageStreamEvent`]s
//! - [`completion_stream`]: a body of legacy completion events as
//!   [`Completion`]s
//!
//! ## Example
//!
//! ```rust,ignore
//! use anthropic_sse_models::anthropic;
//! use futures::StreamExt;
//!
//! let mut events = anthropic::message_stream(body);
//! while let Some(event) = events.next().await {
//!     if let Some(text) = event?.text_delta() {
//!         print!("{}", text);
//!     }
//! }
//! ```

pub mod types;

use anthropic_sse_core::{DispatchPolicy, StreamSettings};
use anthropic_sse_streaming::{sse_response, StreamError, StreamResponse};
use futures::Stream;

// Re-exports
pub use types::{
    ApiError, Completion, ContentBlock, ContentBlockDelta, ErrorEvent, InputUsage, MessageDelta,
    MessageHeader, MessageStreamEvent, OutputUsage,
};

/// Event names forwarded downstream.
pub const FORWARDED_EVENTS: &[&str] = &[
    "completion",
    "message_start",
    "message_delta",
    "message_stop",
    "content_block_start",
    "content_block_delta",
    "content_block_stop",
];

/// Keep-alive event name.
pub const PING_EVENT: &str = "ping";

/// Error event name.
pub const ERROR_EVENT: &str = "error";

/// Dispatch table for Anthropic streams.
///
/// Unknown event names are dropped so that new server-side events do not
/// break older clients.
#[must_use]
pub fn stream_policy() -> DispatchPolicy {
    DispatchPolicy::new()
        .forward(FORWARDED_EVENTS.iter().copied())
        .ignore([PING_EVENT])
        .error(ERROR_EVENT)
}

/// Default settings for Anthropic streams.
#[must_use]
pub fn stream_settings() -> StreamSettings {
    StreamSettings::new().policy(stream_policy())
}

/// A lazy stream of Messages API events.
pub type MessageStream = StreamResponse<MessageStreamEvent>;

/// A lazy stream of legacy completion events.
pub type CompletionStream = StreamResponse<Completion>;

/// Decode a Messages API response body.
pub fn message_stream<S, B, E>(body: S) -> MessageStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]>,
    E: Into<StreamError>,
{
    sse_response(body, stream_settings()).map_json()
}

/// Decode a legacy Text Completions response body.
pub fn completion_stream<S, B, E>(body: S) -> CompletionStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]>,
    E: Into<StreamError>,
{
    sse_response(body, stream_settings()).map_json()
}
