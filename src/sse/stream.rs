//! Adapts a response body into a stream of typed events.

use std::collections::VecDeque;
use std::pin::Pin;

use futures::stream::{self, Stream};
use futures_util::StreamExt;
use tracing::warn;

use crate::error::StreamError;
use crate::sse::events::StreamEvent;
use crate::sse::parser::SseParser;
use crate::traits::ByteStream;

/// Events of one run, in source order. A transport error is the last item.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, StreamError>> + Send>>;

struct State {
    bytes: ByteStream,
    parser: SseParser,
    pending: VecDeque<StreamEvent>,
    done: bool,
}

/// Drive an [`SseParser`] over `bytes`.
///
/// The trailing partial line is flushed when the body ends normally. A read
/// error ends the stream after being yielded once.
pub fn event_stream(bytes: ByteStream) -> EventStream {
    let state = State {
        bytes,
        parser: SseParser::new(),
        pending: VecDeque::new(),
        done: false,
    };

    let events = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.pending.pop_front() {
                return Some((Ok(event), state));
            }
            if state.done {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let parsed = state.parser.feed(&chunk);
                    state.pending.extend(parsed);
                }
                Some(Err(e)) => {
                    warn!(error = %e, "Run stream failed mid-response");
                    state.done = true;
                    return Some((Err(StreamError::from(e)), state));
                }
                None => {
                    state.done = true;
                    let flushed = state.parser.finish();
                    state.pending.extend(flushed);
                }
            }
        }
    });

    Box::pin(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HttpError;
    use bytes::Bytes;

    fn body(chunks: Vec<Result<Bytes, HttpError>>) -> ByteStream {
        Box::pin(futures::stream::iter(chunks))
    }

    #[tokio::test]
    async fn test_events_across_chunks() {
        let stream = event_stream(body(vec![
            Ok(Bytes::from("event: content\ndata: {\"cont")),
            Ok(Bytes::from("ent\": \"Hi\"}\n\nevent: run-completed\n")),
            Ok(Bytes::from("data: {}")),
        ]));

        let events: Vec<_> = stream.collect().await;
        assert_eq!(
            events,
            vec![
                Ok(StreamEvent::Content {
                    text: "Hi".to_string()
                }),
                Ok(StreamEvent::RunCompleted { session_id: None }),
            ]
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_terminal() {
        let stream = event_stream(body(vec![
            Ok(Bytes::from("event: content\ndata: {\"content\": \"part\"}\n\n")),
            Err(HttpError::Io("connection reset".to_string())),
            Ok(Bytes::from("event: content\ndata: {\"content\": \"never\"}\n\n")),
        ]));

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 2);
        assert!(events[0].is_ok());
        assert!(matches!(
            events[1],
            Err(StreamError::ConnectionLost { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let events: Vec<_> = event_stream(body(vec![])).collect().await;
        assert!(events.is_empty());
    }
}
