//! Session Handler
//!
//! Upgrades `/ws` to a WebSocket and runs one dashboard session on it.
//! Each valid selection message triggers a synchronous recomputation of
//! both charts, pushed back as a `charts` message.

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

use super::hub::SessionHub;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::dashboard::Dashboard;
use crate::filter::SelectionState;

/// WebSocket upgrade handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.sessions);
    let dashboard = Arc::clone(&state.dashboard);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, dashboard))
}

/// Run an established session until either side closes
async fn handle_socket(socket: WebSocket, hub: Arc<SessionHub>, dashboard: Arc<Dashboard>) {
    let (mut sender, mut receiver) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let session_id = match hub.register(tx, dashboard.initial_selection()).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open dashboard session");
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            if let Ok(text) = serde_json::to_string(&error_msg) {
                let _ = sender.send(Message::Text(text)).await;
            }
            return;
        }
    };

    let connected_msg = ServerMessage::Connected {
        session_id: session_id.clone(),
        layout: dashboard.layout().clone(),
    };
    let sent = match serde_json::to_string(&connected_msg) {
        Ok(text) => sender.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize connected message");
            false
        }
    };
    if !sent {
        tracing::error!(session_id = %session_id, "Failed to send connected message");
        hub.unregister(&session_id).await;
        return;
    }

    // Initial charts, before any widget has changed
    push_current_charts(&hub, &dashboard, &session_id).await;

    let session_for_send = session_id.clone();

    // Forward queued messages to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            session_id = %session_for_send,
                            "WebSocket send failed, closing session"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
        }
    });

    let hub_for_recv = Arc::clone(&hub);
    let session_for_recv = session_id.clone();

    // Handle selection messages from the page, one at a time
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&hub_for_recv, &dashboard, &session_for_recv, msg).await
                    {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_for_recv,
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

    hub.unregister(&session_id).await;
}

/// Handle a received WebSocket frame
///
/// Returns false if the session should be closed.
async fn handle_ws_message(
    hub: &SessionHub,
    dashboard: &Dashboard,
    session_id: &str,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    handle_client_message(hub, dashboard, session_id, client_msg).await;
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_id,
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    send_error(hub, session_id, format!("Invalid message format: {}", e)).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            send_error(hub, session_id, "Binary messages not supported".to_string()).await;
            true
        }
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(session_id = %session_id, "Client requested close");
            false
        }
    }
}

/// Handle a parsed client message
pub(crate) async fn handle_client_message(
    hub: &SessionHub,
    dashboard: &Dashboard,
    session_id: &str,
    message: ClientMessage,
) {
    let event = match message.into_event() {
        Ok(Some(event)) => event,
        Ok(None) => {
            let _ = hub.send_to(session_id, ServerMessage::Pong).await;
            return;
        }
        Err(e) => {
            send_error(hub, session_id, e.to_string()).await;
            return;
        }
    };

    match hub.apply(session_id, event).await {
        Ok((selection, sequence)) => {
            push_charts(hub, dashboard, session_id, selection, sequence).await;
        }
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "Selection update failed");
            send_error(hub, session_id, e.to_string()).await;
        }
    }
}

async fn push_current_charts(hub: &SessionHub, dashboard: &Dashboard, session_id: &str) {
    match hub.selection(session_id).await {
        Ok((selection, sequence)) => {
            push_charts(hub, dashboard, session_id, selection, sequence).await;
        }
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "Session vanished");
        }
    }
}

/// Recompute both charts for `selection` and queue them for the page
async fn push_charts(
    hub: &SessionHub,
    dashboard: &Dashboard,
    session_id: &str,
    selection: SelectionState,
    sequence: u64,
) {
    let message = match dashboard.render(&selection) {
        Ok(update) => ServerMessage::Charts {
            sequence,
            selection,
            pie: update.pie,
            scatter: update.scatter,
        },
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "Chart rendering failed");
            ServerMessage::Error {
                message: e.to_string(),
            }
        }
    };
    let _ = hub.send_to(session_id, message).await;
}

async fn send_error(hub: &SessionHub, session_id: &str, message: String) {
    let _ = hub
        .send_to(session_id, ServerMessage::Error { message })
        .await;
}
