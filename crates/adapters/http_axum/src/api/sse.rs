//! Server-Sent Events (SSE) stream of hub messages.

use std::convert::Infallible;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;

use pulsehub_domain::message::Message;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /` — SSE stream of every message published to the hub.
///
/// Registers a new subscriber for the lifetime of the response. Each
/// message is sent as one `data:` frame and flushed on its own. When the
/// client disconnects axum drops the stream, which drops the subscription
/// and deregisters it from the hub. The stream also ends if the hub shuts
/// down.
///
/// # Errors
///
/// Responds `503 Service Unavailable` if the hub is no longer running.
pub async fn stream(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let subscription = state.hub.subscribe()?;
    tracing::debug!(subscriber = %subscription.id(), "opening event stream");

    let events = subscription.map(|message| Ok::<_, Infallible>(frame(&message)));

    Ok((
        [(header::CONNECTION, "keep-alive")],
        Sse::new(events).keep_alive(KeepAlive::default()),
    ))
}

/// Build the SSE frame for a message.
///
/// SSE treats CR, LF and CRLF alike as line breaks, but axum only accepts
/// LF inside a data field, so CR and CRLF are folded into LF first. Each
/// line becomes its own `data:` field.
fn frame(message: &Message) -> Event {
    let text = message.as_str();
    if text.contains('\r') {
        Event::default().data(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Event::default().data(text)
    }
}
