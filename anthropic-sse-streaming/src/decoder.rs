//! Server-Sent Events field accumulation.
//!
//! [`SseDecoder`] implements the event-stream interpretation rules of the
//! WHATWG HTML standard, one line at a time:
//! <https://html.spec.whatwg.org/multipage/server-sent-events.html#event-stream-interpretation>
//!
//! Lines never produce a message on their own. Fields accumulate until a
//! blank line flushes them into an [`SseMessage`].

use crate::error::{StreamError, StreamResult};
use anthropic_sse_core::SseMessage;
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Per-stream SSE accumulator.
///
/// One decoder belongs to exactly one stream; it must not be shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseDecoder {
    event: Option<String>,
    data: Vec<String>,
    last_id: Option<String>,
    retry: Option<i32>,
}

impl SseDecoder {
    /// Create an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line (without its terminator).
    ///
    /// Returns a message only when `line` is blank and something has been
    /// accumulated.
    pub fn decode(&mut self, line: &str) -> Option<SseMessage> {
        if line.is_empty() {
            return self.flush();
        }

        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_owned()),
            "data" => self.data.push(value.to_owned()),
            "id" => {
                if !value.contains('\0') {
                    self.last_id = (!value.is_empty()).then(|| value.to_owned());
                }
            }
            "retry" => {
                if let Ok(retry) = value.parse() {
                    self.retry = Some(retry);
                }
            }
            _ => {}
        }

        None
    }

    /// Fold-style transition: consume the decoder and a line, return the
    /// next decoder state and the message the line completed, if any.
    #[must_use]
    pub fn step(mut self, line: &str) -> (Self, Option<SseMessage>) {
        let message = self.decode(line);
        (self, message)
    }

    /// Decode a finite batch of lines.
    pub fn decode_all<I, L>(&mut self, lines: I) -> Vec<SseMessage>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.decode(line.as_ref()))
            .collect()
    }

    /// The last event ID seen on this stream.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_id.as_deref()
    }

    fn flush(&mut self) -> Option<SseMessage> {
        if self.is_empty() {
            self.event = None;
            return None;
        }

        let message = SseMessage {
            event: self.event.take().filter(|event| !event.is_empty()),
            data: self.data.join("\n"),
            id: self.last_id.clone(),
            retry: self.retry.take(),
        };

        // The last event ID survives the flush.
        self.data.clear();

        Some(message)
    }

    fn is_empty(&self) -> bool {
        self.event.as_deref().map_or(true, str::is_empty)
            && self.data.is_empty()
            && self.last_id.is_none()
            && self.retry.is_none()
    }
}

pin_project! {
    /// Stream adapter that decodes a line stream into SSE messages.
    pub struct SseMessageStream<S> {
        #[pin]
        inner: S,
        decoder: SseDecoder,
        done: bool,
    }
}

impl<S> SseMessageStream<S> {
    /// Create a message stream over a line stream.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            decoder: SseDecoder::new(),
            done: false,
        }
    }

    /// The last event ID seen so far.
    pub fn last_event_id(&self) -> Option<&str> {
        self.decoder.last_event_id()
    }
}

impl<S, L, E> Stream for SseMessageStream<S>
where
    S: Stream<Item = Result<L, E>>,
    L: AsRef<str>,
    E: Into<StreamError>,
{
    type Item = StreamResult<SseMessage>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        loop {
            match ready!(this.inner.as_mut().poll_next(cx)) {
                Some(Ok(line)) => {
                    if let Some(message) = this.decoder.decode(line.as_ref()) {
                        tracing::trace!(
                            event = message.event.as_deref().unwrap_or_default(),
                            bytes = message.data.len(),
                            "decoded SSE message"
                        );
                        return Poll::Ready(Some(Ok(message)));
                    }
                }
                Some(Err(err)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(err.into())));
                }
                None => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{stream, StreamExt};
    use rstest::rstest;

    fn decode(lines: &[&str]) -> Vec<SseMessage> {
        SseDecoder::new().decode_all(lines)
    }

    #[rstest]
    #[case(&["data: a", "event: x", "id: 1", "retry: 10"])]
    #[case(&[": comment", "data", "unknown: field"])]
    #[case(&["data: a", "data: b", "data: c"])]
    fn test_no_message_without_blank_line(#[case] lines: &[&str]) {
        let mut decoder = SseDecoder::new();
        for line in lines {
            assert!(decoder.decode(line).is_none());
        }
    }

    #[test]
    fn test_single_flush_captures_fields() {
        let messages = decode(&[
            "event: message_start",
            "data: {\"a\":1}",
            "id: 7",
            "retry: 2500",
            "",
        ]);

        assert_eq!(
            messages,
            vec![SseMessage::data("{\"a\":1}")
                .with_event("message_start")
                .with_id("7")
                .with_retry(2500)]
        );
    }

    #[test]
    fn test_blank_lines_alone_produce_nothing() {
        assert!(decode(&["", "", ""]).is_empty());
    }

    #[test]
    fn test_event_last_write_wins() {
        let messages = decode(&["event: a", "event: b", "data: x", ""]);
        assert_eq!(messages[0].event.as_deref(), Some("b"));
    }

    #[test]
    fn test_multiline_data_joined_in_order() {
        let messages = decode(&["data:a", "data:b", ""]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].data, "a\nb");
    }

    #[test]
    fn test_empty_data_lines_kept() {
        let messages = decode(&["data", "data:", "data: x", ""]);
        assert_eq!(messages[0].data, "\n\nx");
    }

    #[rstest]
    #[case("data:x", "x")]
    #[case("data: x", "x")]
    #[case("data:  x", " x")]
    #[case("data: a:b", "a:b")]
    fn test_single_leading_space_stripped(#[case] line: &str, #[case] expected: &str) {
        let messages = decode(&[line, ""]);
        assert_eq!(messages[0].data, expected);
    }

    #[test]
    fn test_id_persists_across_flushes() {
        let messages = decode(&["id:1", "", "data:x", ""]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id.as_deref(), Some("1"));
        assert_eq!(messages[0].data, "");
        assert_eq!(messages[1].id.as_deref(), Some("1"));
        assert_eq!(messages[1].data, "x");
    }

    #[test]
    fn test_id_with_nul_ignored() {
        let mut decoder = SseDecoder::new();
        decoder.decode("id: good");
        decoder.decode("id: b\0ad");
        assert_eq!(decoder.last_event_id(), Some("good"));

        let message = decoder.decode("").unwrap();
        assert_eq!(message.id.as_deref(), Some("good"));
    }

    #[test]
    fn test_empty_id_clears_last_id() {
        let mut decoder = SseDecoder::new();
        decoder.decode("id: 1");
        decoder.decode("id");
        assert_eq!(decoder.last_event_id(), None);
        assert!(decoder.decode("").is_none());
    }

    #[test]
    fn test_retry_validation() {
        let mut decoder = SseDecoder::new();
        decoder.decode("retry: 100");
        decoder.decode("retry: soon");
        decoder.decode("retry: 2147483648");
        let message = decoder.decode("").unwrap();
        assert_eq!(message.retry, Some(100));

        decoder.decode("retry: 100");
        decoder.decode("retry: 200");
        decoder.decode("data: x");
        let message = decoder.decode("").unwrap();
        assert_eq!(message.retry, Some(200));
    }

    #[test]
    fn test_negative_retry_alone_flushes() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.decode("retry: -5").is_none());

        let message = decoder.decode("").unwrap();
        assert_eq!(message.retry, Some(-5));
        assert_eq!(message.data, "");
        assert_eq!(message.event, None);
    }

    #[test]
    fn test_retry_and_event_reset_on_flush() {
        let messages = decode(&["event: a", "retry: 5", "data: 1", "", "data: 2", ""]);
        assert_eq!(messages[1].event, None);
        assert_eq!(messages[1].retry, None);
    }

    #[test]
    fn test_comment_changes_nothing() {
        let mut decoder = SseDecoder::new();
        decoder.decode("data: x");
        let before = decoder.clone();

        assert!(decoder.decode(":keep-alive").is_none());
        assert_eq!(decoder, before);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let messages = decode(&["foo: bar", "Data: nope", "data: yes", ""]);
        assert_eq!(messages, vec![SseMessage::data("yes")]);
    }

    #[test]
    fn test_empty_event_name_is_unnamed() {
        let messages = decode(&["event:", "data: x", ""]);
        assert_eq!(messages[0].event, None);
    }

    #[test]
    fn test_step_matches_decode() {
        let (state, message) = SseDecoder::new().step("data: x");
        assert!(message.is_none());

        let (state, message) = state.step("");
        assert_eq!(message, Some(SseMessage::data("x")));
        assert_eq!(state, SseDecoder::new());
    }

    #[tokio::test]
    async fn test_message_stream() {
        let lines = vec![
            "event: ping",
            "data: {}",
            "",
            ": comment",
            "data: a",
            "data: b",
            "",
            "data: trailing",
        ];
        let stream = stream::iter(lines.into_iter().map(Ok::<_, StreamError>));
        let messages: Vec<SseMessage> = SseMessageStream::new(stream)
            .map(|message| message.unwrap())
            .collect()
            .await;

        assert_eq!(
            messages,
            vec![
                SseMessage::data("{}").with_event("ping"),
                SseMessage::data("a\nb"),
            ]
        );
    }

    #[tokio::test]
    async fn test_message_stream_stops_after_error() {
        let lines: Vec<StreamResult<&str>> = vec![
            Ok("data: a"),
            Err(StreamError::LineTooLong { limit: 1 }),
            Ok(""),
        ];
        let mut stream = SseMessageStream::new(stream::iter(lines));

        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }
}
