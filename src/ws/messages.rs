//! WebSocket message types: envelope, commands, and change events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Deployment, EntityChange};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server message stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error message.
    #[must_use]
    pub fn error(id: impl Into<String>, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Receive changes to the given entity types. `"*"` matches every type.
    Subscribe {
        /// Entity type names, e.g. `["SupplySnapshot"]`.
        entity_types: Vec<String>,
        /// Restricts the subscription to one namespace. Omitted means both.
        #[serde(default)]
        deployment: Option<Deployment>,
    },
    /// Stop receiving changes to the given entity types.
    Unsubscribe {
        /// Entity type names.
        entity_types: Vec<String>,
        /// Scope the subscription was made with.
        #[serde(default)]
        deployment: Option<Deployment>,
    },
}

/// Payload of an `event` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Namespace the entity was written to.
    pub deployment: Deployment,
    /// Entity type name.
    pub entity_type: String,
    /// Entity ID.
    pub id: String,
    /// Full entity as stored.
    pub data: serde_json::Value,
}

impl From<&EntityChange> for ChangeEvent {
    fn from(change: &EntityChange) -> Self {
        Self {
            deployment: change.deployment,
            entity_type: change.entity_type.clone(),
            id: change.id.clone(),
            data: change.data.clone(),
        }
    }
}
