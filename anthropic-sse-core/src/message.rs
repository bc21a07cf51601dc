//! Assembled Server-Sent Events messages.
//!
//! An [`SseMessage`] is the unit produced by the decoder on every non-empty
//! flush. It is an immutable value: once built it is moved downstream and
//! never touched again by the decoder.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A fully assembled SSE message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SseMessage {
    /// Event type, `None` for the default unnamed event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// All `data:` values of the record joined by `\n`.
    pub data: String,
    /// Last event ID seen on the stream, carried across messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Reconnection time in milliseconds, if the record carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<i32>,
}

impl SseMessage {
    /// Create a message carrying only data.
    pub fn data(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Set the event type.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Set the event ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the retry value.
    #[must_use]
    pub fn with_retry(mut self, retry: i32) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Event name, or `None` for unnamed events.
    pub fn event_name(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// Parse the data payload as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_helpers() {
        let message = SseMessage::data("hello")
            .with_event("message_start")
            .with_id("42")
            .with_retry(3000);

        assert_eq!(message.event_name(), Some("message_start"));
        assert_eq!(message.data, "hello");
        assert_eq!(message.id.as_deref(), Some("42"));
        assert_eq!(message.retry, Some(3000));
    }

    #[test]
    fn test_json_payload() {
        let message = SseMessage::data(r#"{"type":"ping"}"#);
        let value: serde_json::Value = message.json().unwrap();
        assert_eq!(value["type"], "ping");
    }

    #[test]
    fn test_json_payload_error() {
        let message = SseMessage::data("not json");
        assert!(message.json::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let json = serde_json::to_string(&SseMessage::data("x")).unwrap();
        assert_eq!(json, r#"{"data":"x"}"#);
    }
}
