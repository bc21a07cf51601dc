//! # anthropic-sse-models
//!
//! Anthropic event types and response adapters for anthropic-sse.
//!
//! - [`anthropic`]: payload types, the event dispatch table, and typed
//!   stream constructors for the Messages and Text Completions APIs
//! - [`http`]: adapters taking over the body of a `reqwest::Response`
//!   (feature `http`, on by default)
//!
//! ## Example
//!
//! ```rust,ignore
//! use anthropic_sse_models::http;
//! use futures::StreamExt;
//!
//! let response = client.post(url).json(&request).send().await?.error_for_status()?;
//! let mut events = http::message_stream(response);
//!
//! while let Some(event) = events.next().await {
//!     if let Some(text) = event?.text_delta() {
//!         print!("{}", text);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod anthropic;

#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub mod http;

// Re-exports
pub use anthropic::{
    completion_stream, message_stream, stream_policy, stream_settings, Completion,
    CompletionStream, MessageStream, MessageStreamEvent,
};
