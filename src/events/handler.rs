//! WebSocket handler
//!
//! Handles WebSocket upgrade requests and the connection lifecycle.
//! Every connection receives the full clock event stream; the client
//! may send `ping` (keepalive) and `dismiss` (acknowledge a fired
//! alarm).

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::EventHub;
use super::messages::{ClientMessage, ClockEvent};
use crate::api::AppState;
use crate::clock::driver::ClockDriver;

/// WebSocket upgrade handler
///
/// Entry point for `/ws` connections: upgrades the HTTP connection and
/// starts streaming clock events.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.hub);
    let driver = Arc::clone(&state.driver);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, driver))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, hub: Arc<EventHub>, driver: Arc<ClockDriver>) {
    let (mut sender, mut receiver) = socket.split();

    // Channel the hub publishes into for this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ClockEvent>();

    let connection_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register WebSocket connection");
            let error_msg = ClockEvent::Error {
                message: e.to_string(),
            };
            if let Ok(text) = serde_json::to_string(&error_msg) {
                let _ = sender.send(Message::Text(text)).await;
            }
            return;
        }
    };

    let connected = ClockEvent::Connected {
        connection_id: connection_id.clone(),
    };
    let connected_text = match serde_json::to_string(&connected) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize connected message");
            hub.unregister(&connection_id).await;
            return;
        }
    };
    if sender.send(Message::Text(connected_text)).await.is_err() {
        hub.unregister(&connection_id).await;
        return;
    }

    let conn_id_for_send = connection_id.clone();

    // Forward events from the hub channel to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            connection_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                }
            }
        }
    });

    let hub_for_recv = Arc::clone(&hub);
    let conn_id_for_recv = connection_id.clone();

    // Handle messages coming back from the client
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&hub_for_recv, &driver, &conn_id_for_recv, msg).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unregister(&connection_id).await;
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(
    hub: &Arc<EventHub>,
    driver: &Arc<ClockDriver>,
    connection_id: &str,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Ping) => {
                    let _ = hub.send_to(connection_id, ClockEvent::Pong).await;
                }
                Ok(ClientMessage::Dismiss) => {
                    driver.dismiss().await;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    let error_msg = ClockEvent::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = hub.send_to(connection_id, error_msg).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let error_msg = ClockEvent::Error {
                message: "Binary messages not supported".to_string(),
            };
            let _ = hub.send_to(connection_id, error_msg).await;
            true
        }
        // Axum handles ping/pong frames automatically
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            false
        }
    }
}
