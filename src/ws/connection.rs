//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding filtered entity
//! changes.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{ChangeEvent, WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::EntityChange;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching changes from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut change_rx: broadcast::Receiver<EntityChange>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            change = change_rx.recv() => {
                match change {
                    Ok(change) => {
                        if !subs.matches(change.deployment, &change.entity_type) {
                            continue;
                        }
                        let Some(json) = event_message(&change) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

fn event_message(change: &EntityChange) -> Option<String> {
    let payload = serde_json::to_value(ChangeEvent::from(change)).ok()?;
    let msg = WsMessage::new(uuid::Uuid::new_v4().to_string(), WsMessageType::Event, payload);
    serde_json::to_string(&msg).ok()
}

/// Handles a text message from the client, returning an optional JSON
/// response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error("", 400, "malformed JSON")).ok();
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let payload = match command {
        WsCommand::Subscribe {
            entity_types,
            deployment,
        } => {
            subs.subscribe(deployment, &entity_types);
            serde_json::json!({
                "subscribed": entity_types,
                "deployment": deployment,
                "count": subs.count(),
                "wildcard": subs.has_wildcard(deployment),
            })
        }
        WsCommand::Unsubscribe {
            entity_types,
            deployment,
        } => {
            subs.unsubscribe(deployment, &entity_types);
            serde_json::json!({
                "unsubscribed": entity_types,
                "deployment": deployment,
                "remaining_count": subs.count(),
                "wildcard": subs.has_wildcard(deployment),
            })
        }
    };

    serde_json::to_string(&WsMessage::new(msg.id, WsMessageType::Response, payload)).ok()
}
