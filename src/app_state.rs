//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::chain::StateReader;
use crate::domain::EventBus;
use crate::persistence::Store;
use crate::service::{IngestService, QueryService};

/// Ingest service over the runtime-selected backends.
pub type AppIngestService = IngestService<Store, StateReader>;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event ingestion and reduction.
    pub ingest: Arc<AppIngestService>,
    /// Read access to stored entities.
    pub query: QueryService<Store>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
