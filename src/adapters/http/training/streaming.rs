//! Server-sent event framing for chat replies.
//!
//! Wire protocol, one JSON object per `data:` line:
//! - `{"text": "..."}` for each reply slice
//! - `{"done": true}` once the reply is stored
//! - `{"error": "..."}` if the reply failed
//!
//! The stream ends after the first `done` or `error`.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use tokio::sync::mpsc;

use crate::application::ChatEvent;

/// JSON payload for one chat event.
pub fn event_payload(event: &ChatEvent) -> serde_json::Value {
    match event {
        ChatEvent::Text(text) => serde_json::json!({ "text": text }),
        ChatEvent::Done => serde_json::json!({ "done": true }),
        ChatEvent::Error(message) => serde_json::json!({ "error": message }),
    }
}

fn is_terminal(event: &ChatEvent) -> bool {
    matches!(event, ChatEvent::Done | ChatEvent::Error(_))
}

/// Turns the handler's event channel into an SSE stream.
pub fn chat_event_stream(
    rx: mpsc::Receiver<ChatEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    stream::unfold(Some(rx), |state| async move {
        let mut rx = state?;
        let event = rx.recv().await?;
        let sse = Event::default().data(event_payload(&event).to_string());
        let next = if is_terminal(&event) { None } else { Some(rx) };
        Some((Ok(sse), next))
    })
}

/// SSE response with keep-alive comments for long generations.
///
/// axum sets `content-type: text/event-stream` and `cache-control: no-cache`.
pub fn chat_sse(
    rx: mpsc::Receiver<ChatEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    Sse::new(chat_event_stream(rx)).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
