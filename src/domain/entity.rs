//! Stored entities and their keys.
//!
//! The store is schemaless: it keeps one JSON document per
//! `(deployment, entity type, id)`. [`Entity`] is the object-safe view the
//! reducer uses to persist any record without knowing its concrete type.

use num_bigint::BigUint;
use serde::Serialize;

use super::event::EventContext;
use super::ids::EventId;
use super::params::EventParams;
use super::primitives::Bytes32;
use super::Deployment;
use crate::error::IndexerError;
use crate::serialization::uint;

/// Address of a single entity in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    /// Namespace the entity belongs to.
    pub deployment: Deployment,
    /// Entity type name (e.g. `"SupplySnapshot"`).
    pub entity_type: String,
    /// Entity ID.
    pub id: String,
}

impl EntityKey {
    /// Creates a key.
    #[must_use]
    pub fn new(deployment: Deployment, entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            deployment,
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

/// A record that can be written to the entity store.
pub trait Entity: std::fmt::Debug + Send + Sync {
    /// Entity type name.
    fn entity_type(&self) -> &'static str;

    /// Entity ID as stored.
    fn id(&self) -> String;

    /// Serializes the full record, including its `id` field.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Internal`] if serialization fails.
    fn to_json(&self) -> Result<serde_json::Value, IndexerError>;
}

/// Serializes any entity body to a JSON value.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, IndexerError> {
    serde_json::to_value(value)
        .map_err(|e| IndexerError::Internal(format!("entity serialization failed: {e}")))
}

/// Immutable record of a single contract event.
///
/// Serializes as the event parameters plus `id`, `blockNumber`,
/// `blockTimestamp`, and `transactionHash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEntity<P> {
    /// Hash ++ log index identifier.
    pub id: EventId,
    /// Event parameters, copied verbatim.
    #[serde(flatten)]
    pub params: P,
    /// Enclosing block height.
    #[serde(with = "uint")]
    pub block_number: BigUint,
    /// Enclosing block timestamp.
    #[serde(with = "uint")]
    pub block_timestamp: BigUint,
    /// Enclosing transaction hash.
    pub transaction_hash: Bytes32,
}

impl<P: EventParams> EventEntity<P> {
    /// Builds the record for `params` emitted in `ctx`.
    #[must_use]
    pub fn new(ctx: &EventContext, params: P) -> Self {
        Self {
            id: EventId::from_context(ctx),
            params,
            block_number: ctx.block_number.clone(),
            block_timestamp: ctx.block_timestamp.clone(),
            transaction_hash: ctx.transaction_hash,
        }
    }
}

impl<P: EventParams> Entity for EventEntity<P> {
    fn entity_type(&self) -> &'static str {
        P::ENTITY_TYPE
    }

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn to_json(&self) -> Result<serde_json::Value, IndexerError> {
        to_json(self)
    }
}
