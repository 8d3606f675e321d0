//! Supply aggregator.
//!
//! Folds each mint or burn into the [`CumulativeSupplyStats`] singleton and
//! writes one [`SupplySnapshot`] carrying the event delta, the ledger after
//! the event, and a live `totalSupply()` read.

use crate::chain::ContractStateReader;
use crate::domain::aggregates::CUMULATIVE_STATS_ID;
use crate::domain::ids::snapshot_id;
use crate::domain::{
    CumulativeSupplyStats, Deployment, EntityChange, EntityKey, EventContext, SupplyChange,
    SupplySide, SupplySnapshot,
};
use crate::error::IndexerError;
use crate::persistence::{EntityStore, load_entity, save_entity};

/// Applies `change` to the ledger in place.
///
/// Adds the amount to the matching all-time total, bumps the matching
/// counter, and stamps the event's block and timestamp.
pub fn fold(stats: &mut CumulativeSupplyStats, change: &SupplyChange, ctx: &EventContext) {
    match change.side {
        SupplySide::Mint(_) => {
            stats.all_time_minted += &change.amount;
            stats.total_mint_events = stats.total_mint_events.saturating_add(1);
        }
        SupplySide::Burn(_) => {
            stats.all_time_burned += &change.amount;
            stats.total_burn_events = stats.total_burn_events.saturating_add(1);
        }
    }
    stats.last_updated_block = ctx.block_number.clone();
    stats.last_updated_timestamp = ctx.block_timestamp.clone();
}

/// Runs the supply step for one mint or burn.
///
/// Order: load (or create) the singleton, fold, save it, read
/// `totalSupply()`, save the snapshot. A failed read leaves the updated
/// singleton saved without a snapshot.
///
/// # Errors
///
/// Returns [`IndexerError::Store`] or [`IndexerError::ContractRead`] from
/// the underlying capabilities.
pub async fn apply<S, R>(
    store: &S,
    reader: &R,
    deployment: Deployment,
    ctx: &EventContext,
    change: SupplyChange,
) -> Result<Vec<EntityChange>, IndexerError>
where
    S: EntityStore,
    R: ContractStateReader,
{
    let key = EntityKey::new(
        deployment,
        CumulativeSupplyStats::ENTITY_TYPE,
        CUMULATIVE_STATS_ID,
    );
    let mut stats = load_entity::<_, CumulativeSupplyStats>(store, &key)
        .await?
        .unwrap_or_default();

    fold(&mut stats, &change, ctx);
    let stats_change = save_entity(store, deployment, &stats).await?;
    tracing::debug!(
        side = change.side.event_type(),
        minted = %stats.all_time_minted,
        burned = %stats.all_time_burned,
        "supply ledger updated"
    );

    let total_supply = reader.total_supply(ctx.address).await?;

    let snapshot = SupplySnapshot {
        id: snapshot_id(ctx),
        block_number: ctx.block_number.clone(),
        tx_hash: ctx.transaction_hash,
        timestamp: ctx.block_timestamp.clone(),
        side: change.side,
        total_supply,
        amount: change.amount,
        all_time_minted: stats.all_time_minted,
        all_time_burned: stats.all_time_burned,
    };
    let snapshot_change = save_entity(store, deployment, &snapshot).await?;

    Ok(vec![stats_change, snapshot_change])
}
