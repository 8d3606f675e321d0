//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams entity changes as they are
//! written. Clients subscribe by entity type name.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
