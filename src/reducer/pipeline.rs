//! Per-event processing steps.
//!
//! Each contract event expands into an ordered list of [`Step`]s. The
//! per-event record always comes first; aggregate steps follow. The reducer
//! runs the list in order, so the record of a mint is saved before the
//! supply ledger is touched.

use std::fmt;

use serde::de::DeserializeOwned;

use super::mapper;
use crate::domain::params::EventParams;
use crate::domain::{
    BurnContext, CumulativeSupplyStats, Deployment, Entity, EventContext, MintContext,
    SupplyChange, SupplySide, SupplySnapshot, SvsnEvent, VsnEvent, YieldSnapshot,
};

/// One unit of work for the reducer.
#[derive(Debug)]
pub enum Step {
    /// Save the immutable per-event record.
    Record(Box<dyn Entity>),
    /// Fold a mint or burn into the supply ledger and snapshot it.
    Supply(SupplyChange),
    /// Snapshot the wrapper's exchange rate.
    Yield,
}

/// A typed event of one indexed contract.
pub trait ContractEvent: DeserializeOwned + fmt::Debug + Send + Sync + 'static {
    /// Deployment whose namespace this contract's entities live in.
    const DEPLOYMENT: Deployment;

    /// Accepted event names.
    const EVENT_NAMES: &'static [&'static str];

    /// Returns the ABI event name.
    fn event_name(&self) -> &'static str;

    /// Expands the event into its ordered steps.
    fn pipeline(&self, ctx: &EventContext) -> Vec<Step>;

    /// Aggregate entity types written in addition to the record when an
    /// event called `name` is processed.
    fn aggregates(name: &str) -> &'static [&'static str];
}

fn record<P: EventParams>(ctx: &EventContext, params: &P) -> Step {
    Step::Record(Box::new(mapper::map(ctx, params.clone())))
}

const SUPPLY_AGGREGATES: &[&str] = &[
    CumulativeSupplyStats::ENTITY_TYPE,
    SupplySnapshot::ENTITY_TYPE,
];

const YIELD_AGGREGATES: &[&str] = &[YieldSnapshot::ENTITY_TYPE];

impl ContractEvent for VsnEvent {
    const DEPLOYMENT: Deployment = Deployment::Vsn;
    const EVENT_NAMES: &'static [&'static str] = &VsnEvent::NAMES;

    fn event_name(&self) -> &'static str {
        self.name()
    }

    fn pipeline(&self, ctx: &EventContext) -> Vec<Step> {
        match self {
            Self::Mint(p) => vec![
                record(ctx, p),
                Step::Supply(SupplyChange {
                    amount: p.amount.clone(),
                    side: SupplySide::Mint(MintContext {
                        to: p.to,
                        minter: p.minter,
                    }),
                }),
            ],
            Self::Burn(p) => vec![
                record(ctx, p),
                Step::Supply(SupplyChange {
                    amount: p.amount.clone(),
                    // The Burn event carries no holder, so `from` is the burner.
                    side: SupplySide::Burn(BurnContext {
                        from: p.burner,
                        burner: p.burner,
                    }),
                }),
            ],
            Self::Approval(p) => vec![record(ctx, p)],
            Self::Eip712DomainChanged(p) => vec![record(ctx, p)],
            Self::Initialized(p) => vec![record(ctx, p)],
            Self::Paused(p) => vec![record(ctx, p)],
            Self::RoleAdminChanged(p) => vec![record(ctx, p)],
            Self::RoleGranted(p) => vec![record(ctx, p)],
            Self::RoleRevoked(p) => vec![record(ctx, p)],
            Self::Transfer(p) => vec![record(ctx, p)],
            Self::Unpaused(p) => vec![record(ctx, p)],
            Self::Upgraded(p) => vec![record(ctx, p)],
        }
    }

    fn aggregates(name: &str) -> &'static [&'static str] {
        match name {
            "Mint" | "Burn" => SUPPLY_AGGREGATES,
            _ => &[],
        }
    }
}

impl ContractEvent for SvsnEvent {
    const DEPLOYMENT: Deployment = Deployment::Svsn;
    const EVENT_NAMES: &'static [&'static str] = &SvsnEvent::NAMES;

    fn event_name(&self) -> &'static str {
        self.name()
    }

    fn pipeline(&self, ctx: &EventContext) -> Vec<Step> {
        match self {
            Self::DistributeRewards(p) => vec![record(ctx, p), Step::Yield],
            Self::Approval(p) => vec![record(ctx, p)],
            Self::AssetsClaimed(p) => vec![record(ctx, p)],
            Self::BpsYieldCapPerSecondUpdated(p) => vec![record(ctx, p)],
            Self::CooldownDurationUpdated(p) => vec![record(ctx, p)],
            Self::CooldownStarted(p) => vec![record(ctx, p)],
            Self::Deposit(p) => vec![record(ctx, p)],
            Self::MaximumRewardsCycleDurationUpdated(p) => vec![record(ctx, p)],
            Self::Paused(p) => vec![record(ctx, p)],
            Self::RewardsCycleCreated(p) => vec![record(ctx, p)],
            Self::RoleAdminChanged(p) => vec![record(ctx, p)],
            Self::RoleGranted(p) => vec![record(ctx, p)],
            Self::RoleRevoked(p) => vec![record(ctx, p)],
            Self::Transfer(p) => vec![record(ctx, p)],
            Self::Unpaused(p) => vec![record(ctx, p)],
            Self::Withdraw(p) => vec![record(ctx, p)],
            Self::WithdrawSurplus(p) => vec![record(ctx, p)],
        }
    }

    fn aggregates(name: &str) -> &'static [&'static str] {
        match name {
            "DistributeRewards" => YIELD_AGGREGATES,
            _ => &[],
        }
    }
}

/// Every entity type a deployment can hold: one per event name followed by
/// the aggregate types.
#[must_use]
pub fn entity_types(deployment: Deployment) -> Vec<&'static str> {
    fn collect<E: ContractEvent>() -> Vec<&'static str> {
        let mut types: Vec<&'static str> = E::EVENT_NAMES.to_vec();
        for name in E::EVENT_NAMES {
            for &aggregate in E::aggregates(name) {
                if !types.contains(&aggregate) {
                    types.push(aggregate);
                }
            }
        }
        types
    }

    match deployment {
        Deployment::Vsn => collect::<VsnEvent>(),
        Deployment::Svsn => collect::<SvsnEvent>(),
    }
}
