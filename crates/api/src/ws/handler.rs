use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use quad_core::types::DbId;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;

/// Interval between keep-alive pings (in seconds).
const PING_INTERVAL_SECS: u64 = 30;

/// GET /api/v1/events/{id}/ws
///
/// Upgrades the connection and attaches the client to the event's
/// notification topic. Every notification published for that event arrives
/// as one JSON text frame.
pub async fn event_ws_handler(
    ws: WebSocketUpgrade,
    Path(event_id): Path<DbId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_subscriber(socket, state, event_id))
}

/// Forward topic messages to the socket until either side goes away.
///
/// Subscribers are read-only: inbound frames other than Close and Pong are
/// ignored. Dropping the receiver detaches the subscription; the hub prunes
/// the topic on a later publish once no receivers remain.
async fn handle_subscriber(socket: WebSocket, state: AppState, event_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let mut rx = state.hub.subscribe(event_id).await;
    tracing::info!(conn_id = %conn_id, event_id, "Subscriber attached");

    let (mut sink, mut stream) = socket.split();
    let mut ping = tokio::time::interval(Duration::from_secs(PING_INTERVAL_SECS));

    loop {
        tokio::select! {
            notification = rx.recv() => match notification {
                Ok(message) => {
                    let frame = match serde_json::to_string(&message) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!(conn_id = %conn_id, error = %e, "Failed to encode notification");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(conn_id = %conn_id, event_id, skipped, "Subscriber lagged; missed notifications dropped");
                }
                Err(RecvError::Closed) => {
                    // Hub shut down; tell the client before hanging up.
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Pong(_))) => {
                    tracing::trace!(conn_id = %conn_id, "Pong received");
                }
                Some(Ok(_)) => {
                    // Subscribers do not send; ignore other frames.
                }
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            },
            _ = ping.tick() => {
                if sink.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::info!(conn_id = %conn_id, event_id, "Subscriber detached");
}
