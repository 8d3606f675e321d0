//! Notifications emitted after every entity write.
//!
//! The reducer returns one [`EntityChange`] per save, in write order. The
//! ingest service broadcasts them through the [`super::EventBus`] to
//! WebSocket subscribers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Deployment;

/// A single entity save.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityChange {
    /// Namespace written to.
    pub deployment: Deployment,
    /// Entity type name.
    pub entity_type: String,
    /// Entity ID.
    pub id: String,
    /// Full record as stored.
    pub data: serde_json::Value,
    /// Wall-clock time of the write.
    pub timestamp: DateTime<Utc>,
}

impl EntityChange {
    /// Returns the `(entity_type, id)` pair identifying the record.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.entity_type, &self.id)
    }
}
