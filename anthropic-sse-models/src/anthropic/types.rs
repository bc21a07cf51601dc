//! Anthropic streaming payload types.
//!
//! Only the fields a stream consumer acts on are modelled; everything else
//! in the payload is skipped during deserialization. Tags this version does
//! not know about land in an `Unknown` variant instead of failing the stream.

use serde::Deserialize;

// ============================================================================
// Messages Stream
// ============================================================================

/// Forwarded event of the Messages streaming API.
///
/// `ping` and `error` never reach this type: the stream policy drops the
/// former and turns the latter into [`StreamError::Protocol`].
///
/// [`StreamError::Protocol`]: anthropic_sse_streaming::StreamError::Protocol
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageStreamEvent {
    /// First event of a message.
    MessageStart {
        /// Message metadata.
        message: MessageHeader,
    },
    /// A content block opened at `index`.
    ContentBlockStart {
        /// Block position.
        index: usize,
        /// Block kind and initial content.
        content_block: ContentBlock,
    },
    /// Incremental content for the block at `index`.
    ContentBlockDelta {
        /// Block position.
        index: usize,
        /// The increment.
        delta: ContentBlockDelta,
    },
    /// The block at `index` is complete.
    ContentBlockStop {
        /// Block position.
        index: usize,
    },
    /// Top-level message changes, sent once generation stops.
    MessageDelta {
        /// Stop information.
        delta: MessageDelta,
        /// Cumulative output usage.
        #[serde(default)]
        usage: Option<OutputUsage>,
    },
    /// Last event of a message.
    MessageStop,
    /// Event type this version does not know about.
    #[serde(other)]
    Unknown,
}

impl MessageStreamEvent {
    /// Text carried by a `text_delta`, if this is one.
    pub fn text_delta(&self) -> Option<&str> {
        match self {
            Self::ContentBlockDelta {
                delta: ContentBlockDelta::TextDelta { text },
                ..
            } => Some(text),
            _ => None,
        }
    }

    /// Whether this event ends the message.
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::MessageStop)
    }
}

/// Message metadata sent with `message_start`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageHeader {
    /// Message ID.
    pub id: String,
    /// Model serving the request.
    pub model: String,
    /// Initial usage.
    #[serde(default)]
    pub usage: InputUsage,
}

/// A content block as announced by `content_block_start`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentBlock {
    /// Block kind, e.g. `text` or `tool_use`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Initial text of a `text` block.
    #[serde(default)]
    pub text: Option<String>,
    /// Tool name of a `tool_use` block.
    #[serde(default)]
    pub name: Option<String>,
}

/// Increment of a content block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlockDelta {
    /// More text for a `text` block.
    TextDelta {
        /// Appended text.
        text: String,
    },
    /// Fragment of a tool input; fragments concatenate to a JSON document.
    InputJsonDelta {
        /// Appended JSON text.
        partial_json: String,
    },
    /// Delta type this version does not know about.
    #[serde(other)]
    Unknown,
}

/// Stop information carried by `message_delta`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageDelta {
    /// e.g. `end_turn` or `max_tokens`.
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Token usage known when the message starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct InputUsage {
    /// Prompt tokens.
    #[serde(default)]
    pub input_tokens: u64,
    /// Output tokens so far.
    #[serde(default)]
    pub output_tokens: u64,
}

/// Output token count reported by `message_delta`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OutputUsage {
    /// Output tokens so far.
    #[serde(default)]
    pub output_tokens: u64,
}

/// Error body sent inside an `error` event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiError {
    /// e.g. `overloaded_error`.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable description.
    pub message: String,
}

/// Payload of an `error` event, recovered from
/// [`StreamError::protocol_detail`](anthropic_sse_streaming::StreamError::protocol_detail).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorEvent {
    /// Error details.
    pub error: ApiError,
}

impl ErrorEvent {
    /// Parse the detail carried by a protocol error.
    pub fn parse(detail: &str) -> Option<Self> {
        serde_json::from_str(detail).ok()
    }
}

// ============================================================================
// Text Completions Stream
// ============================================================================

/// Event of the legacy Text Completions streaming API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Completion {
    /// Completion ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Text generated since the previous event.
    pub completion: String,
    /// Set on the final event.
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Model serving the request.
    #[serde(default)]
    pub model: Option<String>,
}
