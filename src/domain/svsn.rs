//! Events emitted by the sVSN yield-bearing wrapper.

use serde::Deserialize;

use super::params::{
    ApprovalParams, AssetsClaimedParams, BpsYieldCapPerSecondUpdatedParams,
    CooldownDurationUpdatedParams, CooldownStartedParams, DepositParams, DistributeRewardsParams,
    MaximumRewardsCycleDurationUpdatedParams, PausedParams, RewardsCycleCreatedParams,
    RoleAdminChangedParams, RoleGrantedParams, RoleRevokedParams, TransferParams, UnpausedParams,
    WithdrawParams, WithdrawSurplusParams,
};

/// Every event of the sVSN vault ABI that the indexer handles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "params")]
pub enum SvsnEvent {
    /// ERC-20 allowance change on vault shares.
    Approval(ApprovalParams),
    /// Cooled-down assets claimed.
    AssetsClaimed(AssetsClaimedParams),
    /// Per-second yield cap changed.
    BpsYieldCapPerSecondUpdated(BpsYieldCapPerSecondUpdatedParams),
    /// Cooldown duration changed.
    CooldownDurationUpdated(CooldownDurationUpdatedParams),
    /// Redemption cooldown started.
    CooldownStarted(CooldownStartedParams),
    /// ERC-4626 deposit.
    Deposit(DepositParams),
    /// Rewards added to the vault. Feeds the yield snapshot series.
    DistributeRewards(DistributeRewardsParams),
    /// Maximum rewards cycle duration changed.
    MaximumRewardsCycleDurationUpdated(MaximumRewardsCycleDurationUpdatedParams),
    /// Contract paused.
    Paused(PausedParams),
    /// New rewards cycle started.
    RewardsCycleCreated(RewardsCycleCreatedParams),
    /// Admin role of a role changed.
    RoleAdminChanged(RoleAdminChangedParams),
    /// Role granted.
    RoleGranted(RoleGrantedParams),
    /// Role revoked.
    RoleRevoked(RoleRevokedParams),
    /// ERC-20 transfer of vault shares.
    Transfer(TransferParams),
    /// Contract unpaused.
    Unpaused(UnpausedParams),
    /// ERC-4626 withdrawal.
    Withdraw(WithdrawParams),
    /// Surplus assets withdrawn by the admin.
    WithdrawSurplus(WithdrawSurplusParams),
}

impl SvsnEvent {
    /// Event names accepted by [`SvsnEvent`], in ABI order.
    pub const NAMES: [&'static str; 17] = [
        "Approval",
        "AssetsClaimed",
        "BpsYieldCapPerSecondUpdated",
        "CooldownDurationUpdated",
        "CooldownStarted",
        "Deposit",
        "DistributeRewards",
        "MaximumRewardsCycleDurationUpdated",
        "Paused",
        "RewardsCycleCreated",
        "RoleAdminChanged",
        "RoleGranted",
        "RoleRevoked",
        "Transfer",
        "Unpaused",
        "Withdraw",
        "WithdrawSurplus",
    ];

    /// Returns the ABI event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Approval(_) => "Approval",
            Self::AssetsClaimed(_) => "AssetsClaimed",
            Self::BpsYieldCapPerSecondUpdated(_) => "BpsYieldCapPerSecondUpdated",
            Self::CooldownDurationUpdated(_) => "CooldownDurationUpdated",
            Self::CooldownStarted(_) => "CooldownStarted",
            Self::Deposit(_) => "Deposit",
            Self::DistributeRewards(_) => "DistributeRewards",
            Self::MaximumRewardsCycleDurationUpdated(_) => "MaximumRewardsCycleDurationUpdated",
            Self::Paused(_) => "Paused",
            Self::RewardsCycleCreated(_) => "RewardsCycleCreated",
            Self::RoleAdminChanged(_) => "RoleAdminChanged",
            Self::RoleGranted(_) => "RoleGranted",
            Self::RoleRevoked(_) => "RoleRevoked",
            Self::Transfer(_) => "Transfer",
            Self::Unpaused(_) => "Unpaused",
            Self::Withdraw(_) => "Withdraw",
            Self::WithdrawSurplus(_) => "WithdrawSurplus",
        }
    }
}
