//! REST endpoint handlers organized by resource.

pub mod entities;
pub mod events;
pub mod system;

use axum::Router;

use crate::app_state::AppState;
use crate::domain::Deployment;
use crate::error::IndexerError;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(entities::routes())
}

/// Parses the `{deployment}` path segment.
fn parse_deployment(segment: &str) -> Result<Deployment, IndexerError> {
    segment.parse()
}
