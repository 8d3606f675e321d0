//! Ingest service: serialises event processing per deployment.

use std::sync::atomic::{AtomicU64, Ordering};

use num_bigint::BigUint;
use tokio::sync::Mutex;

use crate::chain::ContractStateReader;
use crate::domain::{
    Address, DecodedEvent, Deployment, EntityChange, EventBus, RawEvent, SvsnEvent, VsnEvent,
};
use crate::error::IndexerError;
use crate::persistence::EntityStore;
use crate::reducer::{ContractEvent, Reducer};

/// Processing state of one deployment, guarded by its own mutex.
#[derive(Debug, Default)]
struct Lane {
    /// Contract the deployment accepts events from, if pinned.
    contract: Option<Address>,
    /// `(block number, log index)` of the last processed event.
    last_position: Option<(BigUint, u32)>,
}

/// Result of one ingest request.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Deployment the events were applied to.
    pub deployment: Deployment,
    /// Number of events fully processed.
    pub processed: usize,
    /// Every entity change, in write order.
    pub changes: Vec<EntityChange>,
}

/// Entry point for decoded events.
///
/// Holds one lock per deployment for the whole pipeline of each event, so
/// processing stays strictly sequential even when requests arrive on
/// several server threads. After every event, its entity changes are
/// published on the [`EventBus`]. Processed counters live outside the
/// locks so they can be read while a batch is in flight.
#[derive(Debug)]
pub struct IngestService<S, R> {
    reducer: Reducer<S, R>,
    event_bus: EventBus,
    vsn: Mutex<Lane>,
    svsn: Mutex<Lane>,
    vsn_processed: AtomicU64,
    svsn_processed: AtomicU64,
}

impl<S, R> IngestService<S, R>
where
    S: EntityStore,
    R: ContractStateReader,
{
    /// Creates the service. `None` contract addresses accept events from
    /// any emitter.
    #[must_use]
    pub fn new(
        reducer: Reducer<S, R>,
        event_bus: EventBus,
        vsn_contract: Option<Address>,
        svsn_contract: Option<Address>,
    ) -> Self {
        let lane = |contract: Option<Address>| {
            Mutex::new(Lane {
                contract,
                ..Lane::default()
            })
        };
        Self {
            reducer,
            event_bus,
            vsn: lane(vsn_contract),
            svsn: lane(svsn_contract),
            vsn_processed: AtomicU64::new(0),
            svsn_processed: AtomicU64::new(0),
        }
    }

    /// Returns the reducer.
    #[must_use]
    pub fn reducer(&self) -> &Reducer<S, R> {
        &self.reducer
    }

    /// Returns the event bus.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Number of events processed for `deployment` since startup.
    #[must_use]
    pub fn processed(&self, deployment: Deployment) -> u64 {
        self.counter(deployment).load(Ordering::Relaxed)
    }

    /// Decodes and processes a batch of envelopes in order.
    ///
    /// Stops at the first failure. Events processed before it stay applied
    /// and their changes stay published.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Decode`] for a malformed envelope,
    /// [`IndexerError::ContractMismatch`] for an event from another contract,
    /// or any store or contract-read error raised while reducing.
    pub async fn ingest(
        &self,
        deployment: Deployment,
        batch: Vec<RawEvent>,
    ) -> Result<IngestOutcome, IndexerError> {
        match deployment {
            Deployment::Vsn => self.ingest_as::<VsnEvent>(batch).await,
            Deployment::Svsn => self.ingest_as::<SvsnEvent>(batch).await,
        }
    }

    async fn ingest_as<E: ContractEvent>(
        &self,
        batch: Vec<RawEvent>,
    ) -> Result<IngestOutcome, IndexerError> {
        let deployment = E::DEPLOYMENT;
        let mut lane = self.lane(deployment).lock().await;
        let mut outcome = IngestOutcome {
            deployment,
            processed: 0,
            changes: Vec::new(),
        };

        for raw in batch {
            let decoded = raw.decode::<E>()?;
            check_contract(&lane, &decoded)?;
            warn_if_out_of_order(&lane, &decoded);

            let changes = self.reducer.process(&decoded).await?;

            lane.last_position = Some(decoded.context.position());
            self.counter(deployment).fetch_add(1, Ordering::Relaxed);
            for change in &changes {
                let _ = self.event_bus.publish(change.clone());
            }
            outcome.processed = outcome.processed.saturating_add(1);
            outcome.changes.extend(changes);
        }

        Ok(outcome)
    }

    fn lane(&self, deployment: Deployment) -> &Mutex<Lane> {
        match deployment {
            Deployment::Vsn => &self.vsn,
            Deployment::Svsn => &self.svsn,
        }
    }

    fn counter(&self, deployment: Deployment) -> &AtomicU64 {
        match deployment {
            Deployment::Vsn => &self.vsn_processed,
            Deployment::Svsn => &self.svsn_processed,
        }
    }
}

fn check_contract<E>(lane: &Lane, decoded: &DecodedEvent<E>) -> Result<(), IndexerError> {
    match lane.contract {
        Some(expected) if expected != decoded.context.address => {
            Err(IndexerError::ContractMismatch {
                expected: expected.to_string(),
                actual: decoded.context.address.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Logs an event at or before the last processed position. The event is
/// still processed, but live contract reads will not match it.
fn warn_if_out_of_order<E: ContractEvent>(lane: &Lane, decoded: &DecodedEvent<E>) {
    let Some(last) = &lane.last_position else {
        return;
    };
    let position = decoded.context.position();
    if position <= *last {
        tracing::warn!(
            deployment = %E::DEPLOYMENT,
            event = decoded.event.event_name(),
            block = %position.0,
            log_index = position.1,
            last_block = %last.0,
            last_log_index = last.1,
            "event delivered out of order"
        );
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::chain::{ContractState, FixedStateReader};
    use crate::persistence::InMemoryStore;

    const TOKEN: &str = "0x1234567890123456789012345678901234567890";

    fn raw(event: serde_json::Value) -> RawEvent {
        let Ok(raw) = serde_json::from_value::<RawEvent>(event) else {
            panic!("envelope should parse");
        };
        raw
    }

    fn transfer(block: u32, log_index: u32) -> RawEvent {
        raw(serde_json::json!({
            "address": TOKEN,
            "block": { "number": block.to_string(), "timestamp": "1" },
            "transaction": { "hash": format!("0x{}", "a1".repeat(32)) },
            "logIndex": log_index.to_string(),
            "event": "Transfer",
            "params": {
                "from": "0x0000000000000000000000000000000000000001",
                "to": "0x0000000000000000000000000000000000000002",
                "amount": "5"
            }
        }))
    }

    fn service(vsn_contract: Option<Address>) -> IngestService<InMemoryStore, FixedStateReader> {
        let Ok(token) = TOKEN.parse::<Address>() else {
            panic!("address should parse");
        };
        let reader = FixedStateReader::new().with_state(token, ContractState::default());
        IngestService::new(
            Reducer::new(InMemoryStore::new(), reader),
            EventBus::new(64),
            vsn_contract,
            None,
        )
    }

    #[tokio::test]
    async fn batch_is_processed_in_order_and_published() {
        let svc = service(None);
        let mut rx = svc.event_bus().subscribe();

        let Ok(outcome) = svc
            .ingest(Deployment::Vsn, vec![transfer(1, 0), transfer(1, 1)])
            .await
        else {
            panic!("batch should ingest");
        };
        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.changes.len(), 2);
        assert_eq!(svc.processed(Deployment::Vsn), 2);
        assert_eq!(svc.processed(Deployment::Svsn), 0);

        let Ok(first) = rx.recv().await else {
            panic!("change should be published");
        };
        assert_eq!(first.entity_type, "Transfer");
    }

    #[tokio::test]
    async fn batch_stops_at_first_bad_event() {
        let svc = service(None);
        let mut bad = transfer(1, 1);
        bad.event = "Mint".to_string();

        let result = svc
            .ingest(Deployment::Vsn, vec![transfer(1, 0), bad, transfer(1, 2)])
            .await;
        assert!(matches!(result, Err(IndexerError::Decode(_))));
        assert_eq!(svc.processed(Deployment::Vsn), 1);
        assert_eq!(svc.reducer().store().len().await, 1);
    }

    #[tokio::test]
    async fn foreign_contract_is_rejected_before_any_write() {
        let other = Address::from_bytes([0xee; 20]);
        let svc = service(Some(other));

        let result = svc.ingest(Deployment::Vsn, vec![transfer(1, 0)]).await;
        assert!(matches!(result, Err(IndexerError::ContractMismatch { .. })));
        assert!(svc.reducer().store().is_empty().await);
    }

    #[tokio::test]
    async fn out_of_order_event_is_still_processed() {
        let svc = service(None);
        let first = svc.ingest(Deployment::Vsn, vec![transfer(5, 0)]).await;
        assert!(first.is_ok());

        let Ok(outcome) = svc.ingest(Deployment::Vsn, vec![transfer(4, 0)]).await else {
            panic!("regressed event should still process");
        };
        assert_eq!(outcome.processed, 1);
    }

    /// Parks inside `total_supply` until released.
    #[derive(Debug, Clone, Default)]
    struct GatedReader {
        entered: std::sync::Arc<tokio::sync::Notify>,
        release: std::sync::Arc<tokio::sync::Notify>,
    }

    impl ContractStateReader for GatedReader {
        async fn total_supply(&self, _contract: Address) -> Result<BigUint, IndexerError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(BigUint::from(5u32))
        }

        async fn total_assets(&self, _contract: Address) -> Result<BigUint, IndexerError> {
            Ok(BigUint::from(0u32))
        }
    }

    #[tokio::test]
    async fn processed_count_is_readable_while_a_batch_holds_the_lane() {
        let reader = GatedReader::default();
        let svc = std::sync::Arc::new(IngestService::new(
            Reducer::new(InMemoryStore::new(), reader.clone()),
            EventBus::new(64),
            None,
            None,
        ));
        let mut mint = transfer(1, 0);
        mint.event = "Mint".to_string();
        mint.params = serde_json::json!({
            "minter": "0x0000000000000000000000000000000000000001",
            "to": "0x0000000000000000000000000000000000000002",
            "amount": "5"
        });

        let worker = std::sync::Arc::clone(&svc);
        let task = tokio::spawn(async move { worker.ingest(Deployment::Vsn, vec![mint]).await });
        reader.entered.notified().await;

        assert!(svc.vsn.try_lock().is_err());
        assert_eq!(svc.processed(Deployment::Vsn), 0);

        reader.release.notify_one();
        let Ok(Ok(outcome)) = task.await else {
            panic!("mint should ingest once released");
        };
        assert_eq!(outcome.processed, 1);
        assert_eq!(svc.processed(Deployment::Vsn), 1);
    }

    #[tokio::test]
    async fn vsn_events_are_not_svsn_events() {
        let svc = service(None);
        let mut mint = transfer(1, 0);
        mint.event = "Mint".to_string();
        mint.params = serde_json::json!({
            "minter": "0x0000000000000000000000000000000000000001",
            "to": "0x0000000000000000000000000000000000000002",
            "amount": "5"
        });
        let result = svc.ingest(Deployment::Svsn, vec![mint]).await;
        assert!(matches!(result, Err(IndexerError::Decode(_))));
    }
}
