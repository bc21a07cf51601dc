//! Event-name based filtering of decoded messages.

use crate::error::{StreamError, StreamResult};
use anthropic_sse_core::{DispatchAction, DispatchPolicy, SseMessage};
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Outcome of dispatching a single message.
#[derive(Debug)]
pub enum Dispatched {
    /// Pass the message downstream.
    Forward(SseMessage),
    /// Drop the message.
    Drop,
    /// End the stream with this error.
    Fail(StreamError),
}

/// Apply a policy to one message.
pub fn dispatch(policy: &DispatchPolicy, message: SseMessage) -> Dispatched {
    match policy.action_for(message.event_name()) {
        DispatchAction::Forward => Dispatched::Forward(message),
        DispatchAction::Ignore => {
            tracing::debug!(
                event = message.event_name().unwrap_or_default(),
                "dropping SSE message"
            );
            Dispatched::Drop
        }
        DispatchAction::Fail => {
            tracing::warn!(
                event = message.event_name().unwrap_or_default(),
                detail = %message.data,
                "server sent an error event"
            );
            Dispatched::Fail(StreamError::Protocol(message.data))
        }
    }
}

pin_project! {
    /// Stream adapter that forwards, drops, or fails on messages according
    /// to a [`DispatchPolicy`].
    pub struct EventDispatcher<S> {
        #[pin]
        inner: S,
        policy: DispatchPolicy,
        done: bool,
    }
}

impl<S> EventDispatcher<S> {
    /// Create a dispatcher over a message stream.
    pub fn new(inner: S, policy: DispatchPolicy) -> Self {
        Self {
            inner,
            policy,
            done: false,
        }
    }

    /// The policy in effect.
    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }
}

impl<S> Stream for EventDispatcher<S>
where
    S: Stream<Item = StreamResult<SseMessage>>,
{
    type Item = StreamResult<SseMessage>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        loop {
            match ready!(this.inner.as_mut().poll_next(cx)) {
                Some(Ok(message)) => match dispatch(this.policy, message) {
                    Dispatched::Forward(message) => return Poll::Ready(Some(Ok(message))),
                    Dispatched::Drop => continue,
                    Dispatched::Fail(err) => {
                        *this.done = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                },
                Some(Err(err)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(err)));
                }
                None => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
            }
        }
    }
}
