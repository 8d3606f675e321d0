//! System endpoints: health check and event catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::{Deployment, SvsnEvent, VsnEvent};
use crate::reducer::ContractEvent;

/// Events processed per deployment since startup.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessedCounts {
    /// VSN events processed.
    pub vsn: u64,
    /// sVSN events processed.
    pub svsn: u64,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the server answers.
    pub status: String,
    /// Server time, RFC 3339.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Entity store backend in use.
    pub store: String,
    /// Events processed since startup.
    pub processed: ProcessedCounts,
}

/// `GET /health`: service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, store backend, and processed event counts.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let processed = ProcessedCounts {
        vsn: state.ingest.processed(Deployment::Vsn),
        svsn: state.ingest.processed(Deployment::Svsn),
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: state.ingest.reducer().store().backend().to_string(),
            processed,
        }),
    )
}

/// One supported event and the entities it writes.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventTypeInfo {
    /// Deployment that accepts the event.
    pub deployment: String,
    /// ABI event name, also the entity type of its record.
    pub event: String,
    /// Aggregate entity types updated in addition to the record.
    pub aggregates: Vec<String>,
}

fn catalog<E: ContractEvent>() -> Vec<EventTypeInfo> {
    E::EVENT_NAMES
        .iter()
        .map(|name| EventTypeInfo {
            deployment: E::DEPLOYMENT.to_string(),
            event: (*name).to_string(),
            aggregates: E::aggregates(name).iter().map(|a| (*a).to_string()).collect(),
        })
        .collect()
}

/// `GET /config/event-types`: list supported events per deployment.
#[utoipa::path(
    get,
    path = "/config/event-types",
    tag = "System",
    summary = "List supported events",
    description = "Returns every event each deployment accepts and the aggregate entities it feeds.",
    responses(
        (status = 200, description = "Event catalog", body = Vec<EventTypeInfo>),
    )
)]
pub async fn event_types_handler() -> impl IntoResponse {
    let mut types = catalog::<VsnEvent>();
    types.extend(catalog::<SvsnEvent>());
    (StatusCode::OK, Json(types))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/event-types", get(event_types_handler))
}
