//! Events emitted by the VSN base token.

use serde::Deserialize;

use super::params::{
    ApprovalParams, BurnParams, Eip712DomainChangedParams, InitializedParams, MintParams,
    PausedParams, RoleAdminChangedParams, RoleGrantedParams, RoleRevokedParams, TransferParams,
    UnpausedParams, UpgradedParams,
};

/// Every event of the VSN token ABI that the indexer handles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "params")]
pub enum VsnEvent {
    /// ERC-20 allowance change.
    Approval(ApprovalParams),
    /// Tokens burned. Feeds the supply ledger.
    Burn(BurnParams),
    /// Tokens minted. Feeds the supply ledger.
    Mint(MintParams),
    /// EIP-712 domain changed.
    #[serde(rename = "EIP712DomainChanged")]
    Eip712DomainChanged(Eip712DomainChangedParams),
    /// Proxy initializer ran.
    Initialized(InitializedParams),
    /// Contract paused.
    Paused(PausedParams),
    /// Admin role of a role changed.
    RoleAdminChanged(RoleAdminChangedParams),
    /// Role granted.
    RoleGranted(RoleGrantedParams),
    /// Role revoked.
    RoleRevoked(RoleRevokedParams),
    /// ERC-20 transfer.
    Transfer(TransferParams),
    /// Contract unpaused.
    Unpaused(UnpausedParams),
    /// Proxy implementation upgraded.
    Upgraded(UpgradedParams),
}

impl VsnEvent {
    /// Event names accepted by [`VsnEvent`], in ABI order.
    pub const NAMES: [&'static str; 12] = [
        "Approval",
        "Burn",
        "EIP712DomainChanged",
        "Initialized",
        "Mint",
        "Paused",
        "RoleAdminChanged",
        "RoleGranted",
        "RoleRevoked",
        "Transfer",
        "Unpaused",
        "Upgraded",
    ];

    /// Returns the ABI event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Approval(_) => "Approval",
            Self::Burn(_) => "Burn",
            Self::Mint(_) => "Mint",
            Self::Eip712DomainChanged(_) => "EIP712DomainChanged",
            Self::Initialized(_) => "Initialized",
            Self::Paused(_) => "Paused",
            Self::RoleAdminChanged(_) => "RoleAdminChanged",
            Self::RoleGranted(_) => "RoleGranted",
            Self::RoleRevoked(_) => "RoleRevoked",
            Self::Transfer(_) => "Transfer",
            Self::Unpaused(_) => "Unpaused",
            Self::Upgraded(_) => "Upgraded",
        }
    }
}
