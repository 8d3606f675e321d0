//! Base event mapper.
//!
//! Every event kind maps to exactly one immutable record: the composite
//! event ID, the parameters copied verbatim, and the block and transaction
//! context. The record is saved without an existence check.

use crate::domain::params::EventParams;
use crate::domain::{EventContext, EventEntity};

/// Builds the per-event record for `params` emitted in `ctx`.
#[must_use]
pub fn map<P: EventParams>(ctx: &EventContext, params: P) -> EventEntity<P> {
    EventEntity::new(ctx, params)
}
