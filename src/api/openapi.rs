//! OpenAPI document for the REST API.

use utoipa::OpenApi;

use crate::api::dto::{ChangeRef, EntityListResponse, IngestResponse, PaginationMeta};
use crate::api::handlers::{entities, events, system};
use crate::domain::event::{BlockRef, RawEvent, TransactionRef};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "vsn-indexer",
        description = "Event reducer and query API for the VSN token and the sVSN vault."
    ),
    paths(
        events::ingest_events,
        entities::list_entities,
        entities::get_entity,
        system::health_handler,
        system::event_types_handler,
    ),
    components(schemas(
        RawEvent,
        BlockRef,
        TransactionRef,
        IngestResponse,
        ChangeRef,
        EntityListResponse,
        PaginationMeta,
        system::HealthResponse,
        system::ProcessedCounts,
        system::EventTypeInfo,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Events", description = "Decoded event ingestion"),
        (name = "Entities", description = "Stored entity queries"),
        (name = "System", description = "Health and catalog"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"/api/v1/{deployment}/events".to_string()));
        assert!(paths.contains(&"/api/v1/{deployment}/entities/{entity_type}/{id}".to_string()));
        assert!(paths.contains(&"/health".to_string()));
    }
}
