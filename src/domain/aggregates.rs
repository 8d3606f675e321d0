//! Derived aggregate records: the supply ledger and the snapshot series.

use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, to_json};
use super::primitives::{Address, Bytes32};
use crate::error::IndexerError;
use crate::serialization::{decimal, uint};

/// Fixed ID of the [`CumulativeSupplyStats`] singleton.
pub const CUMULATIVE_STATS_ID: &str = "cumulative";

/// All-time mint/burn totals for the base token.
///
/// Singleton, loaded and re-saved by every mint or burn. Never cached
/// between events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeSupplyStats {
    /// Always [`CUMULATIVE_STATS_ID`].
    pub id: String,
    /// Sum of all minted amounts.
    #[serde(with = "uint")]
    pub all_time_minted: BigUint,
    /// Sum of all burned amounts.
    #[serde(with = "uint")]
    pub all_time_burned: BigUint,
    /// Number of mint events processed.
    pub total_mint_events: u64,
    /// Number of burn events processed.
    pub total_burn_events: u64,
    /// Block of the last mint or burn.
    #[serde(with = "uint")]
    pub last_updated_block: BigUint,
    /// Timestamp of the last mint or burn.
    #[serde(with = "uint")]
    pub last_updated_timestamp: BigUint,
}

impl CumulativeSupplyStats {
    /// Entity type name.
    pub const ENTITY_TYPE: &'static str = "CumulativeSupplyStats";

    /// A fresh ledger with every numeric field at zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            id: CUMULATIVE_STATS_ID.to_string(),
            all_time_minted: BigUint::ZERO,
            all_time_burned: BigUint::ZERO,
            total_mint_events: 0,
            total_burn_events: 0,
            last_updated_block: BigUint::ZERO,
            last_updated_timestamp: BigUint::ZERO,
        }
    }
}

impl Default for CumulativeSupplyStats {
    fn default() -> Self {
        Self::zero()
    }
}

impl Entity for CumulativeSupplyStats {
    fn entity_type(&self) -> &'static str {
        Self::ENTITY_TYPE
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn to_json(&self) -> Result<serde_json::Value, IndexerError> {
        to_json(self)
    }
}

/// Mint-side references of a supply change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintContext {
    /// Recipient of the minted tokens.
    pub to: Address,
    /// Account that triggered the mint.
    pub minter: Address,
}

/// Burn-side references of a supply change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnContext {
    /// Account the tokens left.
    pub from: Address,
    /// Account that burned the tokens.
    pub burner: Address,
}

/// Direction of a supply change, tagged as `eventType` when stored.
///
/// The variant carries only its own side's references, so a snapshot can
/// never hold both `to` and `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "lowercase")]
pub enum SupplySide {
    /// Tokens were created.
    Mint(MintContext),
    /// Tokens were destroyed.
    Burn(BurnContext),
}

impl SupplySide {
    /// Returns `"mint"` or `"burn"`.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Mint(_) => "mint",
            Self::Burn(_) => "burn",
        }
    }
}

/// A mint or burn to fold into the supply ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyChange {
    /// Amount minted or burned.
    pub amount: BigUint,
    /// Direction and references.
    pub side: SupplySide,
}

/// Point-in-time view of supply after one mint or burn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplySnapshot {
    /// `<txHash>-<logIndex>`.
    pub id: String,
    /// Enclosing block height.
    #[serde(with = "uint")]
    pub block_number: BigUint,
    /// Enclosing transaction hash.
    pub tx_hash: Bytes32,
    /// Enclosing block timestamp.
    #[serde(with = "uint")]
    pub timestamp: BigUint,
    /// `eventType` plus the side-specific references.
    #[serde(flatten)]
    pub side: SupplySide,
    /// Live `totalSupply()` read when the event was processed.
    #[serde(with = "uint")]
    pub total_supply: BigUint,
    /// This event's delta, not the running total.
    #[serde(with = "uint")]
    pub amount: BigUint,
    /// Ledger value after this event.
    #[serde(with = "uint")]
    pub all_time_minted: BigUint,
    /// Ledger value after this event.
    #[serde(with = "uint")]
    pub all_time_burned: BigUint,
}

impl SupplySnapshot {
    /// Entity type name.
    pub const ENTITY_TYPE: &'static str = "SupplySnapshot";
}

impl Entity for SupplySnapshot {
    fn entity_type(&self) -> &'static str {
        Self::ENTITY_TYPE
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn to_json(&self) -> Result<serde_json::Value, IndexerError> {
        to_json(self)
    }
}

/// Event type recorded on every [`YieldSnapshot`].
pub const DISTRIBUTE_REWARDS_EVENT_TYPE: &str = "distributeRewards";

/// Point-in-time exchange rate of the wrapper after a reward distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldSnapshot {
    /// `<txHash>-<logIndex>`.
    pub id: String,
    /// Enclosing block timestamp.
    #[serde(with = "uint")]
    pub timestamp: BigUint,
    /// Enclosing block height.
    #[serde(with = "uint")]
    pub block_number: BigUint,
    /// Live `totalAssets()` read.
    #[serde(with = "uint")]
    pub total_assets: BigUint,
    /// Live `totalSupply()` read.
    #[serde(with = "uint")]
    pub total_supply: BigUint,
    /// `totalAssets / totalSupply`, or `1` when supply is zero.
    #[serde(with = "decimal")]
    pub exchange_rate: BigDecimal,
    /// Always [`DISTRIBUTE_REWARDS_EVENT_TYPE`].
    pub event_type: String,
    /// Enclosing transaction hash.
    pub tx_hash: Bytes32,
}

impl YieldSnapshot {
    /// Entity type name.
    pub const ENTITY_TYPE: &'static str = "YieldSnapshot";
}

impl Entity for YieldSnapshot {
    fn entity_type(&self) -> &'static str {
        Self::ENTITY_TYPE
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn to_json(&self) -> Result<serde_json::Value, IndexerError> {
        to_json(self)
    }
}
