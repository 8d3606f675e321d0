//! Decoded contract events as delivered by the upstream decoder.
//!
//! The decoder posts a [`RawEvent`] envelope per log. [`RawEvent::decode`]
//! validates it into a [`DecodedEvent`] for one contract's event enum:
//! unknown event names, missing or extra parameters, and mistyped values
//! are all decode errors.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::primitives::{Address, Bytes32};
use crate::error::IndexerError;
use crate::serialization::uint;

/// Block fields carried by every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct BlockRef {
    /// Block height.
    #[serde(with = "uint")]
    #[schema(value_type = String, example = "19000000")]
    pub number: BigUint,
    /// Block timestamp in Unix seconds.
    #[serde(with = "uint")]
    #[schema(value_type = String, example = "1700000000")]
    pub timestamp: BigUint,
}

/// Transaction fields carried by every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TransactionRef {
    /// Transaction hash.
    #[schema(value_type = String)]
    pub hash: Bytes32,
}

/// Wire envelope for a single decoded log.
///
/// ```json
/// {
///   "address": "0x1234567890123456789012345678901234567890",
///   "block": { "number": "1", "timestamp": "1" },
///   "transaction": { "hash": "0xa160…" },
///   "logIndex": "1",
///   "event": "Mint",
///   "params": { "minter": "0x…", "to": "0x…", "amount": "1000" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawEvent {
    /// Emitting contract.
    #[schema(value_type = String)]
    pub address: Address,
    /// Enclosing block.
    pub block: BlockRef,
    /// Enclosing transaction.
    pub transaction: TransactionRef,
    /// Position of the log within its transaction.
    #[serde(with = "uint")]
    #[schema(value_type = String, example = "0")]
    pub log_index: BigUint,
    /// Event name as declared in the contract ABI (e.g. `"Transfer"`).
    pub event: String,
    /// Named, typed parameters. May be omitted for parameterless events.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub params: serde_json::Value,
}

impl RawEvent {
    /// Validates the envelope into a typed event of `E`.
    ///
    /// `E` is one contract's event enum, adjacently tagged by `event` /
    /// `params`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Decode`] if the event name is unknown for
    /// `E`, if the parameters do not match the event's declared shape, or
    /// if the log index does not fit in a signed 32-bit integer.
    pub fn decode<E: DeserializeOwned>(self) -> Result<DecodedEvent<E>, IndexerError> {
        let log_index = self
            .log_index
            .to_u32()
            .filter(|idx| i32::try_from(*idx).is_ok())
            .ok_or_else(|| {
                IndexerError::Decode(format!("log index {} exceeds i32 range", self.log_index))
            })?;

        let params = if self.params.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            self.params
        };
        let tagged = serde_json::json!({ "event": self.event, "params": params });
        let event = serde_json::from_value::<E>(tagged)
            .map_err(|e| IndexerError::Decode(format!("event '{}': {e}", self.event)))?;

        Ok(DecodedEvent {
            context: EventContext {
                address: self.address,
                block_number: self.block.number,
                block_timestamp: self.block.timestamp,
                transaction_hash: self.transaction.hash,
                log_index,
            },
            event,
        })
    }
}

/// Block and transaction context shared by all steps of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// Emitting contract.
    pub address: Address,
    /// Enclosing block height.
    pub block_number: BigUint,
    /// Enclosing block timestamp.
    pub block_timestamp: BigUint,
    /// Enclosing transaction hash.
    pub transaction_hash: Bytes32,
    /// Log index, guaranteed to fit in `i32`.
    pub log_index: u32,
}

impl EventContext {
    /// Returns the `(block number, log index)` position used to check
    /// delivery order.
    #[must_use]
    pub fn position(&self) -> (BigUint, u32) {
        (self.block_number.clone(), self.log_index)
    }
}

/// A validated event together with its context.
#[derive(Debug, Clone)]
pub struct DecodedEvent<E> {
    /// Block and transaction context.
    pub context: EventContext,
    /// The typed event.
    pub event: E,
}
