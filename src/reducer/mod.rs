//! Event-driven state reducer.
//!
//! [`Reducer`] turns one decoded event into entity writes:
//!
//! ```text
//! DecodedEvent<E> ── pipeline() ──▶ [Record, Supply | Yield]
//!                                        │
//!            ┌───────────────────────────┼──────────────────────┐
//!            ▼                           ▼                      ▼
//!     mapper::map → save        supply::apply            yields::snapshot
//!                          load → fold → save →        read assets/supply →
//!                          read supply → snapshot      rate → snapshot
//! ```
//!
//! Steps run strictly in order and the first error aborts the event.
//! Writes made by earlier steps are not rolled back.

pub mod mapper;
pub mod pipeline;
pub mod supply;
pub mod yields;

use crate::chain::ContractStateReader;
use crate::domain::{DecodedEvent, EntityChange};
use crate::error::IndexerError;
use crate::persistence::{EntityStore, save_entity};

pub use pipeline::{ContractEvent, Step, entity_types};

/// Applies decoded events to an entity store.
#[derive(Debug, Clone)]
pub struct Reducer<S, R> {
    store: S,
    reader: R,
}

impl<S, R> Reducer<S, R>
where
    S: EntityStore,
    R: ContractStateReader,
{
    /// Creates a reducer over the given store and contract reader.
    #[must_use]
    pub fn new(store: S, reader: R) -> Self {
        Self { store, reader }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Processes one event and returns the entity changes in write order.
    ///
    /// # Errors
    ///
    /// Returns the first store or contract-read error. Entities saved by
    /// earlier steps of the same event stay saved.
    pub async fn process<E: ContractEvent>(
        &self,
        decoded: &DecodedEvent<E>,
    ) -> Result<Vec<EntityChange>, IndexerError> {
        let ctx = &decoded.context;
        let deployment = E::DEPLOYMENT;
        let mut changes = Vec::new();

        for step in decoded.event.pipeline(ctx) {
            match step {
                Step::Record(entity) => {
                    tracing::debug!(entity_type = entity.entity_type(), "record step");
                    changes.push(save_entity(&self.store, deployment, entity.as_ref()).await?);
                }
                Step::Supply(change) => {
                    tracing::debug!(side = change.side.event_type(), "supply step");
                    let written =
                        supply::apply(&self.store, &self.reader, deployment, ctx, change).await?;
                    changes.extend(written);
                }
                Step::Yield => {
                    tracing::debug!("yield step");
                    changes.push(yields::snapshot(&self.store, &self.reader, deployment, ctx).await?);
                }
            }
        }

        tracing::info!(
            %deployment,
            event = decoded.event.event_name(),
            block = %ctx.block_number,
            log_index = ctx.log_index,
            changes = changes.len(),
            "event processed"
        );
        Ok(changes)
    }
}
