//! vsn-indexer server entry point.
//!
//! Starts the Axum HTTP server with the ingest, query, and WebSocket
//! endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use vsn_indexer::api;
use vsn_indexer::app_state::AppState;
use vsn_indexer::chain::{RpcStateReader, StateReader};
use vsn_indexer::config::IndexerConfig;
use vsn_indexer::domain::EventBus;
use vsn_indexer::persistence::{InMemoryStore, PostgresStore, Store};
use vsn_indexer::reducer::Reducer;
use vsn_indexer::service::{IngestService, QueryService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = IndexerConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting vsn-indexer");

    // Build storage and chain access
    let store = if config.persistence_enabled {
        let pg = PostgresStore::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        Store::Postgres(pg)
    } else {
        Store::Memory(InMemoryStore::new())
    };
    let rpc = RpcStateReader::new(config.rpc_url.clone(), config.rpc_timeout())
        .context("building RPC client")?;
    tracing::info!(
        store = store.backend(),
        rpc = rpc.url(),
        vsn = ?config.vsn_address.map(|a| a.to_string()),
        svsn = ?config.svsn_address.map(|a| a.to_string()),
        "backends ready"
    );
    let reader = StateReader::Rpc(rpc);

    // Build service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let ingest = Arc::new(IngestService::new(
        Reducer::new(store.clone(), reader),
        event_bus.clone(),
        config.vsn_address,
        config.svsn_address,
    ));

    // Build application state
    let app_state = AppState {
        ingest,
        query: QueryService::new(store),
        event_bus,
    };

    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
