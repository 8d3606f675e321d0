//! Typed event parameters.
//!
//! One struct per distinct event shape. Field names serialize to the ABI
//! parameter names, so the same struct doubles as the parameter section of
//! the stored per-event entity. Events with identical shapes on both
//! contracts (`Approval`, `Transfer`, role and pause events) share a struct.
//!
//! Every struct denies unknown fields: a payload that carries a parameter
//! the ABI does not declare is a malformed event, not something to ignore.

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::primitives::{Address, Bytes32};
use crate::serialization::uint;

/// Parameters of an event that is stored as its own entity type.
pub trait EventParams: Serialize + Clone + fmt::Debug + Send + Sync + 'static {
    /// Entity type name under which records of this event are stored.
    const ENTITY_TYPE: &'static str;
}

macro_rules! entity_types {
    ($($params:ty => $name:literal),* $(,)?) => {
        $(
            impl EventParams for $params {
                const ENTITY_TYPE: &'static str = $name;
            }
        )*
    };
}

/// `Approval(owner, spender, amount)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApprovalParams {
    /// Token owner.
    pub owner: Address,
    /// Approved spender.
    pub spender: Address,
    /// Allowance.
    #[serde(with = "uint")]
    pub amount: BigUint,
}

/// `Transfer(from, to, amount)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransferParams {
    /// Sender.
    pub from: Address,
    /// Recipient.
    pub to: Address,
    /// Amount transferred.
    #[serde(with = "uint")]
    pub amount: BigUint,
}

/// `Mint(minter, to, amount)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MintParams {
    /// Account that triggered the mint.
    pub minter: Address,
    /// Recipient of the new tokens.
    pub to: Address,
    /// Amount minted.
    #[serde(with = "uint")]
    pub amount: BigUint,
}

/// `Burn(burner, amount)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BurnParams {
    /// Account whose tokens were burned.
    pub burner: Address,
    /// Amount burned.
    #[serde(with = "uint")]
    pub amount: BigUint,
}

/// `EIP712DomainChanged()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Eip712DomainChangedParams {}

/// `Initialized(version)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InitializedParams {
    /// Initializer version.
    #[serde(with = "uint")]
    pub version: BigUint,
}

/// `Paused(account)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PausedParams {
    /// Account that paused the contract.
    pub account: Address,
}

/// `Unpaused(account)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UnpausedParams {
    /// Account that unpaused the contract.
    pub account: Address,
}

/// `RoleAdminChanged(role, previousAdminRole, newAdminRole)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleAdminChangedParams {
    /// Role whose admin changed.
    pub role: Bytes32,
    /// Previous admin role.
    pub previous_admin_role: Bytes32,
    /// New admin role.
    pub new_admin_role: Bytes32,
}

/// `RoleGranted(role, account, sender)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleGrantedParams {
    /// Role granted.
    pub role: Bytes32,
    /// Grantee.
    pub account: Address,
    /// Caller that granted the role.
    pub sender: Address,
}

/// `RoleRevoked(role, account, sender)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleRevokedParams {
    /// Role revoked.
    pub role: Bytes32,
    /// Account that lost the role.
    pub account: Address,
    /// Caller that revoked the role.
    pub sender: Address,
}

/// `Upgraded(implementation)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpgradedParams {
    /// New implementation contract.
    pub implementation: Address,
}

/// `AssetsClaimed(owner, receiver, assets)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetsClaimedParams {
    /// Owner of the cooled-down position.
    pub owner: Address,
    /// Receiver of the assets.
    pub receiver: Address,
    /// Assets claimed.
    #[serde(with = "uint")]
    pub assets: BigUint,
}

/// `BpsYieldCapPerSecondUpdated(previousBpsYieldCapPerSecond, newBpsYieldCapPerSecond)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BpsYieldCapPerSecondUpdatedParams {
    /// Previous cap.
    #[serde(with = "uint")]
    pub previous_bps_yield_cap_per_second: BigUint,
    /// New cap.
    #[serde(with = "uint")]
    pub new_bps_yield_cap_per_second: BigUint,
}

/// `CooldownDurationUpdated(previousDuration, newDuration)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CooldownDurationUpdatedParams {
    /// Previous duration in seconds.
    #[serde(with = "uint")]
    pub previous_duration: BigUint,
    /// New duration in seconds.
    #[serde(with = "uint")]
    pub new_duration: BigUint,
}

/// `CooldownStarted(owner, assets, shares, cooldownEnd)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CooldownStartedParams {
    /// Share owner.
    pub owner: Address,
    /// Assets locked in cooldown.
    #[serde(with = "uint")]
    pub assets: BigUint,
    /// Shares redeemed.
    #[serde(with = "uint")]
    pub shares: BigUint,
    /// Unix timestamp at which the assets become claimable.
    #[serde(with = "uint")]
    pub cooldown_end: BigUint,
}

/// `Deposit(caller, owner, assets, shares)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DepositParams {
    /// Depositing caller.
    pub caller: Address,
    /// Receiver of the shares.
    pub owner: Address,
    /// Assets deposited.
    #[serde(with = "uint")]
    pub assets: BigUint,
    /// Shares minted.
    #[serde(with = "uint")]
    pub shares: BigUint,
}

/// `DistributeRewards(rewards)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DistributeRewardsParams {
    /// Rewards added to the vault.
    #[serde(with = "uint")]
    pub rewards: BigUint,
}

/// `MaximumRewardsCycleDurationUpdated(previousDuration, newDuration)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaximumRewardsCycleDurationUpdatedParams {
    /// Previous maximum in seconds.
    #[serde(with = "uint")]
    pub previous_duration: BigUint,
    /// New maximum in seconds.
    #[serde(with = "uint")]
    pub new_duration: BigUint,
}

/// `RewardsCycleCreated(rewardsCycleAmount, rewardsCycleEndTimestamp, newBpsYieldCapPerSecond)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RewardsCycleCreatedParams {
    /// Rewards streamed over the cycle.
    #[serde(with = "uint")]
    pub rewards_cycle_amount: BigUint,
    /// Cycle end as a Unix timestamp.
    #[serde(with = "uint")]
    pub rewards_cycle_end_timestamp: BigUint,
    /// Yield cap applied for the cycle.
    #[serde(with = "uint")]
    pub new_bps_yield_cap_per_second: BigUint,
}

/// `Withdraw(caller, receiver, owner, assets, shares)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WithdrawParams {
    /// Withdrawing caller.
    pub caller: Address,
    /// Receiver of the assets.
    pub receiver: Address,
    /// Owner of the shares.
    pub owner: Address,
    /// Assets withdrawn.
    #[serde(with = "uint")]
    pub assets: BigUint,
    /// Shares burned.
    #[serde(with = "uint")]
    pub shares: BigUint,
}

/// `WithdrawSurplus(receiver, surplus)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WithdrawSurplusParams {
    /// Receiver of the surplus.
    pub receiver: Address,
    /// Surplus amount.
    #[serde(with = "uint")]
    pub surplus: BigUint,
}

entity_types! {
    ApprovalParams => "Approval",
    TransferParams => "Transfer",
    MintParams => "Mint",
    BurnParams => "Burn",
    Eip712DomainChangedParams => "EIP712DomainChanged",
    InitializedParams => "Initialized",
    PausedParams => "Paused",
    UnpausedParams => "Unpaused",
    RoleAdminChangedParams => "RoleAdminChanged",
    RoleGrantedParams => "RoleGranted",
    RoleRevokedParams => "RoleRevoked",
    UpgradedParams => "Upgraded",
    AssetsClaimedParams => "AssetsClaimed",
    BpsYieldCapPerSecondUpdatedParams => "BpsYieldCapPerSecondUpdated",
    CooldownDurationUpdatedParams => "CooldownDurationUpdated",
    CooldownStartedParams => "CooldownStarted",
    DepositParams => "Deposit",
    DistributeRewardsParams => "DistributeRewards",
    MaximumRewardsCycleDurationUpdatedParams => "MaximumRewardsCycleDurationUpdated",
    RewardsCycleCreatedParams => "RewardsCycleCreated",
    WithdrawParams => "Withdraw",
    WithdrawSurplusParams => "WithdrawSurplus",
}
