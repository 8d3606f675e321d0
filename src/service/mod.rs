//! Service layer: ingest orchestration and read queries.
//!
//! [`IngestService`] decodes incoming envelopes, runs the reducer under a
//! per-deployment lock, and publishes entity changes through the
//! [`super::domain::EventBus`]. [`QueryService`] serves stored entities to
//! the REST API.

pub mod ingest_service;
pub mod query_service;

pub use ingest_service::{IngestOutcome, IngestService};
pub use query_service::{EntityPage, MAX_PER_PAGE, QueryService};
