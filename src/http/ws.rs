//! WebSocket endpoint for live order updates.
//!
//! Each connection subscribes to the [`OrderEvents`] hub and pushes every
//! status update to the client as a JSON text frame. Inbound client frames
//! only keep the connection alive; the feed is one-directional.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use super::state::AppState;
use crate::services::events::OrderEvents;

/// GET /ws
///
/// Upgrade the connection and stream order updates until the client leaves.
pub async fn order_updates(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let events = state.events.clone();
    ws.on_upgrade(move |socket| serve_connection(socket, events))
}

async fn serve_connection(socket: WebSocket, events: OrderEvents) {
    let (mut sink, mut stream) = socket.split();
    let mut updates = events.subscribe();
    debug!("websocket client connected");

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(update) => {
                    let frame = match serde_json::to_string(&update) {
                        Ok(json) => Message::Text(json.into()),
                        Err(e) => {
                            debug!(error = %e, "dropping unserializable update");
                            continue;
                        }
                    };
                    if sink.send(frame).await.is_err() {
                        break;
                    }
                }
                // A lagged subscriber misses events instead of stalling the hub.
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "websocket client lagged behind");
                }
                Err(RecvError::Closed) => break,
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Anything else from the client just keeps the connection alive.
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("websocket client disconnected");
}
