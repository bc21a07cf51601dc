//! Typed JSON mapping of message payloads.

use crate::error::{StreamError, StreamResult};
use anthropic_sse_core::SseMessage;
use futures::Stream;
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Deserialize a message payload, reporting failures as
/// [`StreamError::ResponseRead`].
pub fn map_json<T: DeserializeOwned>(message: &SseMessage) -> StreamResult<T> {
    message.json().map_err(|err| {
        tracing::debug!(
            event = message.event_name().unwrap_or_default(),
            error = %err,
            "failed to deserialize SSE payload"
        );
        StreamError::ResponseRead(err)
    })
}

pin_project! {
    /// Stream adapter that deserializes each message into `T`.
    pub struct JsonStream<S, T> {
        #[pin]
        inner: S,
        done: bool,
        _target: PhantomData<fn() -> T>,
    }
}

impl<S, T> JsonStream<S, T> {
    /// Create a typed stream over a message stream.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            done: false,
            _target: PhantomData,
        }
    }
}

impl<S, T> Stream for JsonStream<S, T>
where
    S: Stream<Item = StreamResult<SseMessage>>,
    T: DeserializeOwned,
{
    type Item = StreamResult<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        let item = match ready!(this.inner.poll_next(cx)) {
            Some(Ok(message)) => map_json(&message),
            Some(Err(err)) => Err(err),
            None => {
                *this.done = true;
                return Poll::Ready(None);
            }
        };

        if item.is_err() {
            *this.done = true;
        }
        Poll::Ready(Some(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{stream, StreamExt};
    use serde::Deserialize;
    use std::error::Error as _;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Delta {
        index: usize,
        text: String,
    }

    #[test]
    fn test_map_json() {
        let message = SseMessage::data(r#"{"index":0,"text":"hi"}"#);
        let delta: Delta = map_json(&message).unwrap();
        assert_eq!(
            delta,
            Delta {
                index: 0,
                text: "hi".into()
            }
        );
    }

    #[test]
    fn test_map_json_shape_mismatch() {
        let message = SseMessage::data(r#"{"index":"zero"}"#);
        let err = map_json::<Delta>(&message).unwrap_err();
        assert!(matches!(err, StreamError::ResponseRead(_)));
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn test_json_stream_stops_on_bad_payload() {
        let input = stream::iter(vec![
            Ok::<_, StreamError>(SseMessage::data(r#"{"index":0,"text":"a"}"#)),
            Ok(SseMessage::data("not json")),
            Ok(SseMessage::data(r#"{"index":1,"text":"b"}"#)),
        ]);
        let mut typed = JsonStream::<_, Delta>::new(input);

        assert_eq!(typed.next().await.unwrap().unwrap().text, "a");
        assert!(matches!(
            typed.next().await.unwrap(),
            Err(StreamError::ResponseRead(_))
        ));
        assert!(typed.next().await.is_none());
    }

    #[tokio::test]
    async fn test_json_stream_passes_upstream_errors() {
        let input = stream::iter(vec![Err::<SseMessage, _>(StreamError::Protocol(
            "nope".into(),
        ))]);
        let mut typed = JsonStream::<_, Delta>::new(input);

        let err = typed.next().await.unwrap().unwrap_err();
        assert_eq!(err.protocol_detail(), Some("nope"));
        assert!(typed.next().await.is_none());
    }
}
