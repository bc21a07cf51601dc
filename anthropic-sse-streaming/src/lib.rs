//! # anthropic-sse-streaming
//!
//! Server-Sent Events decoding for anthropic-sse.
//!
//! A response body flows through four pull-driven stages, none of which
//! reads ahead of the consumer:
//!
//! - **[`LineStream`]**: byte chunks to lines
//! - **[`SseMessageStream`]** / **[`SseDecoder`]**: lines to [`SseMessage`]s
//! - **[`EventDispatcher`]**: forward, drop, or fail by event name
//! - **[`JsonStream`]**: payloads to typed values
//!
//! [`StreamResponse`] wraps the assembled pipeline and releases it as soon
//! as it is exhausted, fails, or is dropped.
//!
//! ## Example
//!
//! ```ignore
//! use anthropic_sse_streaming::prelude::*;
//! use futures::StreamExt;
//!
//! let policy = DispatchPolicy::new()
//!     .forward(["message_start", "content_block_delta"])
//!     .ignore(["ping"])
//!     .error("error");
//!
//! let mut events = sse_response(body, StreamSettings::new().policy(policy))
//!     .map_json::<serde_json::Value>();
//!
//! while let Some(event) = events.next().await {
//!     println!("{}", event?);
//! }
//! ```
//!
//! ## Example - Decoding lines directly
//!
//! ```rust
//! use anthropic_sse_streaming::SseDecoder;
//!
//! let mut decoder = SseDecoder::new();
//! assert!(decoder.decode("event: ping").is_none());
//! assert!(decoder.decode("data: {}").is_none());
//!
//! let message = decoder.decode("").unwrap();
//! assert_eq!(message.event.as_deref(), Some("ping"));
//! assert_eq!(message.data, "{}");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod decoder;
pub mod dispatch;
pub mod error;
pub mod ext;
pub mod lines;
pub mod response;
pub mod typed;

// Re-exports
pub use anthropic_sse_core::{DispatchAction, DispatchPolicy, SseMessage, StreamSettings};
pub use decoder::{SseDecoder, SseMessageStream};
pub use dispatch::{dispatch, Dispatched, EventDispatcher};
pub use error::{BoxError, StreamError, StreamResult};
pub use ext::SseStreamExt;
pub use lines::{LineDecoder, LineStream};
pub use response::{sse_response, StreamResponse};
pub use typed::{map_json, JsonStream};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        sse_response, DispatchAction, DispatchPolicy, SseDecoder, SseMessage, SseStreamExt,
        StreamError, StreamResponse, StreamResult, StreamSettings,
    };
}
