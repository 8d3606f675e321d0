//! Yield aggregator.
//!
//! Each `DistributeRewards` on the wrapper produces one [`YieldSnapshot`]
//! from live `totalAssets()` and `totalSupply()` reads. No running state is
//! kept between snapshots.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::chain::ContractStateReader;
use crate::domain::aggregates::DISTRIBUTE_REWARDS_EVENT_TYPE;
use crate::domain::ids::snapshot_id;
use crate::domain::{Deployment, EntityChange, EventContext, YieldSnapshot};
use crate::error::IndexerError;
use crate::persistence::{EntityStore, save_entity};

/// Significant digits kept in a derived rate.
pub const RATE_PRECISION: u64 = 34;

/// Computes `total_assets / total_supply` as a decimal.
///
/// Returns exactly `1` when `total_supply` is zero. Otherwise the quotient
/// is rounded to [`RATE_PRECISION`] significant digits and trailing zeros
/// are dropped.
#[must_use]
pub fn exchange_rate(total_assets: &BigUint, total_supply: &BigUint) -> BigDecimal {
    if total_supply.is_zero() {
        return BigDecimal::one();
    }
    let assets = BigDecimal::new(BigInt::from(total_assets.clone()), 0);
    let supply = BigDecimal::new(BigInt::from(total_supply.clone()), 0);

    let rate = (assets / supply).with_prec(RATE_PRECISION).normalized();
    // normalized() turns 10 into 1E+1; keep integral rates at scale zero.
    if rate.as_bigint_and_exponent().1 < 0 {
        rate.with_scale(0)
    } else {
        rate
    }
}

/// Runs the yield step for one reward distribution.
///
/// # Errors
///
/// Returns [`IndexerError::ContractRead`] if either read fails and
/// [`IndexerError::Store`] if the snapshot cannot be saved.
pub async fn snapshot<S, R>(
    store: &S,
    reader: &R,
    deployment: Deployment,
    ctx: &EventContext,
) -> Result<EntityChange, IndexerError>
where
    S: EntityStore,
    R: ContractStateReader,
{
    let total_assets = reader.total_assets(ctx.address).await?;
    let total_supply = reader.total_supply(ctx.address).await?;
    let exchange_rate = exchange_rate(&total_assets, &total_supply);

    tracing::debug!(%total_assets, %total_supply, %exchange_rate, "yield snapshot");

    let snapshot = YieldSnapshot {
        id: snapshot_id(ctx),
        timestamp: ctx.block_timestamp.clone(),
        block_number: ctx.block_number.clone(),
        total_assets,
        total_supply,
        exchange_rate,
        event_type: DISTRIBUTE_REWARDS_EVENT_TYPE.to_string(),
        tx_hash: ctx.transaction_hash,
    };
    save_entity(store, deployment, &snapshot).await
}
