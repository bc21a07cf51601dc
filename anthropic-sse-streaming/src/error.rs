//! Streaming errors.

use thiserror::Error;

/// Boxed error type used to carry transport failures unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while reading an SSE stream.
///
/// Every variant is terminal: once a stream yields an error it yields
/// nothing else.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The server sent an explicit error event.
    #[error("Error while streaming: {0}")]
    Protocol(String),

    /// A message payload could not be converted to the target type.
    #[error("Error reading response")]
    ResponseRead(#[source] serde_json::Error),

    /// The byte source failed.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// A single line grew past the configured limit.
    #[error("Line exceeds maximum length of {limit} bytes")]
    LineTooLong {
        /// Configured limit in bytes.
        limit: usize,
    },

    /// IO error from a `std::io` based byte source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamError {
    /// Wrap a transport failure.
    pub fn transport<E: Into<BoxError>>(err: E) -> Self {
        Self::Transport(err.into())
    }

    /// Whether the failure came from the byte source rather than the payload.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Io(_))
    }

    /// Detail sent by the server with an error event, if any.
    pub fn protocol_detail(&self) -> Option<&str> {
        match self {
            Self::Protocol(detail) => Some(detail),
            _ => None,
        }
    }
}

impl From<BoxError> for StreamError {
    fn from(err: BoxError) -> Self {
        Self::Transport(err)
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
