//! Live contract state reads.
//!
//! The aggregators need the contract's current `totalSupply()` and, for the
//! wrapper, `totalAssets()`. [`ContractStateReader`] abstracts that read so
//! the reducer can run against a JSON-RPC node ([`RpcStateReader`]) or a
//! fixed table of values ([`FixedStateReader`]).
//!
//! Reads are not pinned to the event's block: they return whatever the
//! source reports as current.

pub mod fixed;
pub mod rpc;

use std::future::Future;

use num_bigint::BigUint;

use crate::domain::Address;
use crate::error::IndexerError;

pub use fixed::{ContractState, FixedStateReader};
pub use rpc::RpcStateReader;

/// Reads ERC-20 / ERC-4626 totals from a deployed contract.
pub trait ContractStateReader: Send + Sync {
    /// Returns `totalSupply()` of `contract`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ContractRead`] if the call fails or the
    /// result cannot be decoded.
    fn total_supply(
        &self,
        contract: Address,
    ) -> impl Future<Output = Result<BigUint, IndexerError>> + Send;

    /// Returns `totalAssets()` of `contract`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ContractRead`] if the call fails or the
    /// result cannot be decoded.
    fn total_assets(
        &self,
        contract: Address,
    ) -> impl Future<Output = Result<BigUint, IndexerError>> + Send;
}

/// Runtime-selected contract reader.
#[derive(Debug, Clone)]
pub enum StateReader {
    /// Live JSON-RPC node.
    Rpc(RpcStateReader),
    /// Fixed table of totals.
    Fixed(FixedStateReader),
}

impl ContractStateReader for StateReader {
    async fn total_supply(&self, contract: Address) -> Result<BigUint, IndexerError> {
        match self {
            Self::Rpc(reader) => reader.total_supply(contract).await,
            Self::Fixed(reader) => reader.total_supply(contract).await,
        }
    }

    async fn total_assets(&self, contract: Address) -> Result<BigUint, IndexerError> {
        match self {
            Self::Rpc(reader) => reader.total_assets(contract).await,
            Self::Fixed(reader) => reader.total_assets(contract).await,
        }
    }
}
