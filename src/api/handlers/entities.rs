//! Entity query handlers: list and get.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::parse_deployment;
use crate::api::dto::{EntityListResponse, PaginationMeta, PaginationParams};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, IndexerError};

/// `GET /{deployment}/entities/{entity_type}`: list entities of one type.
///
/// # Errors
///
/// Returns [`IndexerError`] for an unknown deployment or entity type, or on
/// store failure.
#[utoipa::path(
    get,
    path = "/api/v1/{deployment}/entities/{entity_type}",
    tag = "Entities",
    summary = "List entities",
    description = "Returns a page of stored entities of one type in first-write order.",
    params(
        ("deployment" = String, Path, description = "Deployment name: `vsn` or `svsn`"),
        ("entity_type" = String, Path, description = "Entity type, e.g. `SupplySnapshot`"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated entity list", body = EntityListResponse),
        (status = 400, description = "Unknown deployment or entity type", body = ErrorResponse),
    )
)]
pub async fn list_entities(
    State(state): State<AppState>,
    Path((deployment, entity_type)): Path<(String, String)>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<EntityListResponse>, IndexerError> {
    let deployment = parse_deployment(&deployment)?;
    let params = params.clamped();

    let page = state
        .query
        .list(deployment, &entity_type, params.page, params.per_page)
        .await?;

    Ok(Json(EntityListResponse {
        pagination: PaginationMeta::new(page.page, page.per_page, page.total),
        data: page.items,
    }))
}

/// `GET /{deployment}/entities/{entity_type}/{id}`: fetch one entity.
///
/// # Errors
///
/// Returns [`IndexerError::EntityNotFound`] if no entity is stored under the
/// ID.
#[utoipa::path(
    get,
    path = "/api/v1/{deployment}/entities/{entity_type}/{id}",
    tag = "Entities",
    summary = "Get entity",
    description = "Returns a single stored entity exactly as written by the reducer.",
    params(
        ("deployment" = String, Path, description = "Deployment name: `vsn` or `svsn`"),
        ("entity_type" = String, Path, description = "Entity type, e.g. `Mint`"),
        ("id" = String, Path, description = "Entity ID"),
    ),
    responses(
        (status = 200, description = "Entity found, as stored"),
        (status = 400, description = "Unknown deployment or entity type", body = ErrorResponse),
        (status = 404, description = "Entity not found", body = ErrorResponse),
    )
)]
pub async fn get_entity(
    State(state): State<AppState>,
    Path((deployment, entity_type, id)): Path<(String, String, String)>,
) -> Result<Json<serde_json::Value>, IndexerError> {
    let deployment = parse_deployment(&deployment)?;
    let entity = state.query.get(deployment, &entity_type, &id).await?;
    Ok(Json(entity))
}

/// Entity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{deployment}/entities/{entity_type}", get(list_entities))
        .route("/{deployment}/entities/{entity_type}/{id}", get(get_entity))
}
