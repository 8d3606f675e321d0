//! Event ingestion handler.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};

use super::parse_deployment;
use crate::api::dto::IngestResponse;
use crate::app_state::AppState;
use crate::domain::RawEvent;
use crate::error::{ErrorResponse, IndexerError};

/// `POST /{deployment}/events`: ingest one decoded event or an array of
/// them.
///
/// Every envelope is validated before the first event is reduced. Events in
/// an array are then processed in order; the first failing event aborts the
/// request and earlier events stay applied.
///
/// # Errors
///
/// Returns [`IndexerError`] for malformed envelopes, unknown events,
/// contract mismatches, or store and RPC failures.
#[utoipa::path(
    post,
    path = "/api/v1/{deployment}/events",
    tag = "Events",
    summary = "Ingest decoded events",
    description = "Accepts a single decoded event envelope or a JSON array of envelopes, in block and log-index order, and runs each through the reducer.",
    params(
        ("deployment" = String, Path, description = "Deployment name: `vsn` or `svsn`"),
    ),
    request_body = RawEvent,
    responses(
        (status = 200, description = "Events processed", body = IngestResponse),
        (status = 400, description = "Malformed event or unknown deployment", body = ErrorResponse),
        (status = 422, description = "Event emitted by an unexpected contract", body = ErrorResponse),
        (status = 500, description = "Entity store failure", body = ErrorResponse),
        (status = 502, description = "Contract state read failed", body = ErrorResponse),
    )
)]
pub async fn ingest_events(
    State(state): State<AppState>,
    Path(deployment): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<IngestResponse>, IndexerError> {
    let deployment = parse_deployment(&deployment)?;
    let batch = parse_batch(body)?;

    let outcome = state.ingest.ingest(deployment, batch).await?;
    Ok(Json(IngestResponse::from(outcome)))
}

/// Accepts either one envelope or an array of envelopes.
fn parse_batch(body: serde_json::Value) -> Result<Vec<RawEvent>, IndexerError> {
    let items = match body {
        serde_json::Value::Array(items) => items,
        single => vec![single],
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<RawEvent>(item)
                .map_err(|e| IndexerError::Decode(format!("envelope {i}: {e}")))
        })
        .collect()
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/{deployment}/events", post(ingest_events))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> serde_json::Value {
        serde_json::json!({
            "address": "0x1234567890123456789012345678901234567890",
            "block": { "number": "1", "timestamp": "1" },
            "transaction": { "hash": format!("0x{}", "a1".repeat(32)) },
            "logIndex": "0",
            "event": "Paused",
            "params": { "account": "0x0000000000000000000000000000000000000001" }
        })
    }

    #[test]
    fn single_and_array_bodies() {
        assert!(matches!(parse_batch(envelope()).map(|b| b.len()), Ok(1)));
        let array = serde_json::json!([envelope(), envelope()]);
        assert!(matches!(parse_batch(array).map(|b| b.len()), Ok(2)));
    }

    #[test]
    fn malformed_envelope_is_decode_error() {
        let mut bad = envelope();
        bad["address"] = serde_json::json!("0x1234");
        let result = parse_batch(serde_json::json!([envelope(), bad]));
        assert!(matches!(result, Err(IndexerError::Decode(msg)) if msg.starts_with("envelope 1")));
    }
}
