//! # anthropic-sse-core
//!
//! Core types, dispatch policy, and error handling for anthropic-sse.
//!
//! - **Messages**: [`SseMessage`], the assembled Server-Sent Events record
//! - **Policy**: [`DispatchPolicy`], the event-name to action table
//! - **Settings**: [`StreamSettings`], line limits and policy in one value
//! - **Errors**: configuration errors
//!
//! ## Example
//!
//! ```rust
//! use anthropic_sse_core::{DispatchAction, DispatchPolicy, SseMessage};
//!
//! let policy = DispatchPolicy::new()
//!     .forward(["message_start", "message_stop"])
//!     .ignore(["ping"])
//!     .error("error");
//!
//! let message = SseMessage::data("{}").with_event("ping");
//! assert_eq!(policy.action_for(message.event_name()), DispatchAction::Ignore);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod errors;
pub mod message;
pub mod policy;
pub mod settings;

pub use errors::{CoreError, Result};
pub use message::SseMessage;
pub use policy::{DispatchAction, DispatchPolicy};
pub use settings::{StreamSettings, DEFAULT_MAX_LINE_LENGTH};
