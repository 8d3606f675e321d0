//! # vsn-indexer
//!
//! Event reducer and query service for the VSN token and its sVSN
//! yield-bearing wrapper.
//!
//! An upstream decoder posts one decoded log at a time. The reducer turns
//! each into an immutable per-event record and, for mints, burns, and
//! reward distributions, updates the cumulative supply ledger or writes a
//! yield snapshot from a live contract read.
//!
//! ## Architecture
//!
//! ```text
//! Decoder (HTTP)              Clients (HTTP, WebSocket)
//!     │                             │
//!     ├── Ingest handler (api/)     ├── Query handlers (api/), WS (ws/)
//!     │                             │
//!     ├── IngestService (service/)  ├── QueryService (service/)
//!     │     per-deployment lock     │
//!     ├── Reducer (reducer/)        │
//!     │     record → supply | yield │
//!     │                             │
//!     ├── EntityStore (persistence/) ◀┘
//!     │     in-memory | PostgreSQL
//!     ├── ContractStateReader (chain/)
//!     │     eth_call totalSupply / totalAssets
//!     └── EventBus (domain/) ──▶ WebSocket subscribers
//! ```

pub mod api;
pub mod app_state;
pub mod chain;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod reducer;
pub mod serialization;
pub mod service;
pub mod ws;
