//! Entity ID derivation.
//!
//! Per-event records use the transaction hash followed by the log index as
//! a little-endian `i32` (36 bytes, hex encoded). Snapshots use the older
//! `<hash>-<logIndex>` string form. Both are part of the query surface and
//! must not change.

use std::fmt;

use serde::{Serialize, Serializer};

use super::event::EventContext;

/// Identifier of a per-event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId([u8; 36]);

impl EventId {
    /// Derives the ID for the log described by `ctx`.
    #[must_use]
    pub fn from_context(ctx: &EventContext) -> Self {
        let mut bytes = [0u8; 36];
        let (hash, index) = bytes.split_at_mut(32);
        hash.copy_from_slice(ctx.transaction_hash.as_bytes());
        index.copy_from_slice(&ctx.log_index.to_le_bytes());
        Self(bytes)
    }

    /// Returns the raw 36 bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 36] {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derives the `<txHash>-<logIndex>` ID shared by supply and yield
/// snapshots.
#[must_use]
pub fn snapshot_id(ctx: &EventContext) -> String {
    format!("{}-{}", ctx.transaction_hash, ctx.log_index)
}
