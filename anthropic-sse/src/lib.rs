//! # anthropic-sse
//!
//! Server-Sent Events decoding for Anthropic streaming APIs.
//!
//! The crate turns a live, incrementally delivered response body into a lazy
//! stream of typed events. Nothing is read ahead of the consumer, and the
//! body is released as soon as the stream ends, fails, or is dropped.
//!
//! ## Quick Start
//!
//! ```ignore
//! use anthropic_sse::prelude::*;
//! use futures::StreamExt;
//!
//! let response = client.post(url).json(&request).send().await?;
//! let mut events = anthropic_sse::models::http::message_stream(response);
//!
//! while let Some(event) = events.next().await {
//!     if let Some(text) = event?.text_delta() {
//!         print!("{}", text);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`anthropic_sse_core`] - Messages, dispatch policy, settings
//! - [`anthropic_sse_streaming`] - Line splitting, SSE decoding, dispatch,
//!   typed mapping, and stream delivery
//! - [`anthropic_sse_models`] - Anthropic payload types and response
//!   adapters
//!
//! ## Pipeline
//!
//! ```text
//! bytes ─▶ LineStream ─▶ SseMessageStream ─▶ EventDispatcher ─▶ JsonStream ─▶ consumer
//! ```
//!
//! Each stage can be used on its own. A custom API surface only needs its
//! own [`DispatchPolicy`]:
//!
//! ```rust
//! use anthropic_sse::prelude::*;
//!
//! let settings = StreamSettings::from_json(r#"{
//!     "policy": {
//!         "events": {"delta": "forward", "heartbeat": "ignore", "failure": "fail"}
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(settings.policy.action_for(Some("delta")), DispatchAction::Forward);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|--------|
//! | `http` | `reqwest::Response` adapters | ✅ |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// Crate Re-exports
// ============================================================================

/// Messages, dispatch policy, and settings.
pub use anthropic_sse_core as core;

/// Decoding pipeline and stream delivery.
pub use anthropic_sse_streaming as streaming;

/// Anthropic payload types and adapters.
pub use anthropic_sse_models as models;

// ============================================================================
// Flat Re-exports
// ============================================================================

pub use anthropic_sse_core::{
    CoreError, DispatchAction, DispatchPolicy, SseMessage, StreamSettings,
};
pub use anthropic_sse_models::{
    completion_stream, message_stream, stream_policy, stream_settings, Completion,
    CompletionStream, MessageStream, MessageStreamEvent,
};
pub use anthropic_sse_streaming::{
    sse_response, EventDispatcher, JsonStream, LineStream, SseDecoder, SseMessageStream,
    SseStreamExt, StreamError, StreamResponse, StreamResult,
};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        message_stream, sse_response, stream_policy, DispatchAction, DispatchPolicy,
        MessageStreamEvent, SseDecoder, SseMessage, SseStreamExt, StreamError, StreamResponse,
        StreamResult, StreamSettings,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use futures::{stream, StreamExt};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_custom_surface_end_to_end() {
        let settings = StreamSettings::from_json(
            r#"{"policy": {"events": {"delta": "forward", "heartbeat": "ignore", "failure": "fail"}}}"#,
        )
        .unwrap();

        let body: Vec<Result<&'static str, StreamError>> = vec![
            Ok("event: delta\ndata: {\"v\":1}\n\n"),
            Ok(": comment\nevent: heartbeat\n\n"),
            Ok("event: delta\ndata: {\"v\":2}\n\nevent: failure\ndata: gone\n\n"),
            Ok("event: delta\ndata: {\"v\":3}\n\n"),
        ];

        let results: Vec<StreamResult<serde_json::Value>> =
            sse_response(stream::iter(body), settings)
                .map_json()
                .collect()
                .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()["v"], 1);
        assert_eq!(results[1].as_ref().unwrap()["v"], 2);
        assert_eq!(
            results[2].as_ref().unwrap_err().protocol_detail(),
            Some("gone")
        );
    }

    #[tokio::test]
    async fn test_anthropic_preset() {
        let body: Vec<Result<&'static str, StreamError>> = vec![Ok(
            "event: message_stop\ndata: {\"type\":\"message_stop\"}\n\n",
        )];
        let events: Vec<StreamResult<MessageStreamEvent>> =
            message_stream(stream::iter(body)).collect().await;

        assert_eq!(events.len(), 1);
        assert!(events[0].as_ref().unwrap().is_stop());
    }
}
