//! Entity query DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;

/// Paginated list response for `GET /api/v1/{deployment}/entities/{entity_type}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntityListResponse {
    /// Entities on this page, as stored.
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
