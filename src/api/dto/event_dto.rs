//! Ingest DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EntityChange;
use crate::service::IngestOutcome;

/// Reference to one entity written by an ingest request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChangeRef {
    /// Entity type name.
    pub entity_type: String,
    /// Entity ID.
    pub id: String,
}

impl From<&EntityChange> for ChangeRef {
    fn from(change: &EntityChange) -> Self {
        Self {
            entity_type: change.entity_type.clone(),
            id: change.id.clone(),
        }
    }
}

/// Response body for `POST /api/v1/{deployment}/events`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngestResponse {
    /// Deployment the events were applied to.
    pub deployment: String,
    /// Number of events processed.
    pub processed: usize,
    /// Entities written, in write order.
    pub changes: Vec<ChangeRef>,
}

impl From<IngestOutcome> for IngestResponse {
    fn from(outcome: IngestOutcome) -> Self {
        Self {
            deployment: outcome.deployment.to_string(),
            processed: outcome.processed,
            changes: outcome.changes.iter().map(ChangeRef::from).collect(),
        }
    }
}
