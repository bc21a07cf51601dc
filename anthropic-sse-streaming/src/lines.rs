//! Splitting a chunked response body into lines.
//!
//! Transports hand over bytes in arbitrary chunks: a line may span several
//! chunks, a chunk may hold many lines, and a `\r\n` pair or a multi-byte
//! UTF-8 character may be cut in half. [`LineDecoder`] buffers just enough to
//! hide that, and [`LineStream`] drives it from an async byte stream.

use crate::error::{StreamError, StreamResult};
use anthropic_sse_core::DEFAULT_MAX_LINE_LENGTH;
use futures::Stream;
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

const BOM: char = '\u{feff}';

/// Incremental line splitter.
///
/// Accepts `\n`, `\r\n` and a lone `\r` as terminators. Terminators are not
/// part of the produced lines.
#[derive(Debug)]
pub struct LineDecoder {
    buffer: Vec<u8>,
    lines: VecDeque<String>,
    pending_cr: bool,
    first_line: bool,
    max_line_length: usize,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::with_max_line_length(DEFAULT_MAX_LINE_LENGTH)
    }
}

impl LineDecoder {
    /// Create a line decoder with the default line limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line decoder that rejects lines longer than `limit` bytes.
    #[must_use]
    pub fn with_max_line_length(limit: usize) -> Self {
        Self {
            buffer: Vec::new(),
            lines: VecDeque::new(),
            pending_cr: false,
            first_line: true,
            max_line_length: limit,
        }
    }

    /// Feed a chunk of bytes.
    pub fn push(&mut self, chunk: &[u8]) -> StreamResult<()> {
        let mut rest = chunk;

        // A `\r` ended the previous chunk; a `\n` here belongs to it.
        if self.pending_cr && !rest.is_empty() {
            self.pending_cr = false;
            if rest[0] == b'\n' {
                rest = &rest[1..];
            }
        }

        while let Some(pos) = rest.iter().position(|b| *b == b'\n' || *b == b'\r') {
            self.buffer.extend_from_slice(&rest[..pos]);
            self.check_length()?;
            self.emit_line();

            let terminator = rest[pos];
            rest = &rest[pos + 1..];
            if terminator == b'\r' {
                match rest.first() {
                    Some(b'\n') => rest = &rest[1..],
                    Some(_) => {}
                    None => self.pending_cr = true,
                }
            }
        }

        self.buffer.extend_from_slice(rest);
        self.check_length()
    }

    /// Signal end of input; an unterminated trailing line becomes a line.
    pub fn finish(&mut self) {
        if !self.buffer.is_empty() {
            self.emit_line();
        }
        self.pending_cr = false;
    }

    /// Take the next complete line.
    pub fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    /// Number of bytes waiting for a terminator.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    fn check_length(&self) -> StreamResult<()> {
        if self.buffer.len() > self.max_line_length {
            return Err(StreamError::LineTooLong {
                limit: self.max_line_length,
            });
        }
        Ok(())
    }

    fn emit_line(&mut self) {
        let bytes = std::mem::take(&mut self.buffer);
        let mut line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };

        if self.first_line {
            self.first_line = false;
            if line.starts_with(BOM) {
                line.replace_range(..BOM.len_utf8(), "");
            }
        }

        self.lines.push_back(line);
    }
}

pin_project! {
    /// Stream adapter that turns a byte-chunk stream into text lines.
    pub struct LineStream<S> {
        #[pin]
        inner: S,
        decoder: LineDecoder,
        pending_error: Option<StreamError>,
        finished: bool,
    }
}

impl<S> LineStream<S> {
    /// Create a line stream with the default line limit.
    pub fn new(inner: S) -> Self {
        Self::with_max_line_length(inner, DEFAULT_MAX_LINE_LENGTH)
    }

    /// Create a line stream with a custom line limit.
    pub fn with_max_line_length(inner: S, limit: usize) -> Self {
        Self {
            inner,
            decoder: LineDecoder::with_max_line_length(limit),
            pending_error: None,
            finished: false,
        }
    }
}

impl<S, B, E> Stream for LineStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<StreamError>,
{
    type Item = StreamResult<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(line) = this.decoder.next_line() {
                return Poll::Ready(Some(Ok(line)));
            }

            // Lines completed before the failure go out first.
            if let Some(err) = this.pending_error.take() {
                return Poll::Ready(Some(Err(err)));
            }

            if *this.finished {
                return Poll::Ready(None);
            }

            match ready!(this.inner.as_mut().poll_next(cx)) {
                Some(Ok(chunk)) => {
                    if let Err(err) = this.decoder.push(chunk.as_ref()) {
                        *this.finished = true;
                        *this.pending_error = Some(err);
                    }
                }
                Some(Err(err)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(err.into())));
                }
                None => {
                    *this.finished = true;
                    this.decoder.finish();
                }
            }
        }
    }
}
