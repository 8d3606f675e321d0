//! Table-driven contract state for tests and offline replays.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use num_bigint::BigUint;

use super::ContractStateReader;
use crate::domain::Address;
use crate::error::IndexerError;

/// Totals reported for one contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractState {
    /// `totalSupply()`.
    pub total_supply: BigUint,
    /// `totalAssets()`.
    pub total_assets: BigUint,
}

/// [`ContractStateReader`] that answers from an in-memory table.
///
/// Clones share the table, so a test can change the reported totals between
/// events. Reading a contract with no entry is an error.
#[derive(Debug, Clone, Default)]
pub struct FixedStateReader {
    states: Arc<RwLock<HashMap<Address, ContractState>>>,
}

impl FixedStateReader {
    /// Creates a reader with no contracts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FixedStateReader::set`].
    #[must_use]
    pub fn with_state(self, contract: Address, state: ContractState) -> Self {
        self.set(contract, state);
        self
    }

    /// Sets the totals reported for `contract`.
    pub fn set(&self, contract: Address, state: ContractState) {
        self.states
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(contract, state);
    }

    /// Sets only `totalSupply()` for `contract`.
    pub fn set_total_supply(&self, contract: Address, total_supply: BigUint) {
        self.states
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(contract)
            .or_default()
            .total_supply = total_supply;
    }

    fn get(&self, contract: Address) -> Result<ContractState, IndexerError> {
        self.states
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&contract)
            .cloned()
            .ok_or_else(|| IndexerError::ContractRead(format!("no state for {contract}")))
    }
}

impl ContractStateReader for FixedStateReader {
    async fn total_supply(&self, contract: Address) -> Result<BigUint, IndexerError> {
        self.get(contract).map(|state| state.total_supply)
    }

    async fn total_assets(&self, contract: Address) -> Result<BigUint, IndexerError> {
        self.get(contract).map(|state| state.total_assets)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_configured_totals() {
        let contract = Address::from_bytes([7u8; 20]);
        let reader = FixedStateReader::new().with_state(
            contract,
            ContractState {
                total_supply: BigUint::from(10u32),
                total_assets: BigUint::from(15u32),
            },
        );

        let Ok(supply) = reader.total_supply(contract).await else {
            panic!("supply read failed");
        };
        let Ok(assets) = reader.total_assets(contract).await else {
            panic!("assets read failed");
        };
        assert_eq!(supply, BigUint::from(10u32));
        assert_eq!(assets, BigUint::from(15u32));
    }

    #[tokio::test]
    async fn unknown_contract_is_error() {
        let reader = FixedStateReader::new();
        let result = reader.total_supply(Address::ZERO).await;
        assert!(matches!(result, Err(IndexerError::ContractRead(_))));
    }

    #[tokio::test]
    async fn clones_share_the_table() {
        let reader = FixedStateReader::new();
        let handle = reader.clone();
        handle.set_total_supply(Address::ZERO, BigUint::from(3u32));

        let Ok(supply) = reader.total_supply(Address::ZERO).await else {
            panic!("supply read failed");
        };
        assert_eq!(supply, BigUint::from(3u32));
    }
}
