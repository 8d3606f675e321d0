//! In-memory entity store.
//!
//! [`InMemoryStore`] keeps every document in a `HashMap` behind a
//! [`tokio::sync::RwLock`]. Clones share the same map, so the ingest path
//! and the query API see the same state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::EntityStore;
use crate::domain::{Deployment, EntityKey};
use crate::error::IndexerError;

#[derive(Debug)]
struct StoredEntity {
    /// First-write sequence number; kept on upsert.
    seq: u64,
    data: serde_json::Value,
}

#[derive(Debug, Default)]
struct MemoryState {
    entities: HashMap<EntityKey, StoredEntity>,
    next_seq: u64,
}

/// Process-local [`EntityStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored entities across all types.
    pub async fn len(&self) -> usize {
        self.state.read().await.entities.len()
    }

    /// Returns `true` if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entities.is_empty()
    }
}

impl EntityStore for InMemoryStore {
    async fn load(&self, key: &EntityKey) -> Result<Option<serde_json::Value>, IndexerError> {
        let state = self.state.read().await;
        Ok(state.entities.get(key).map(|stored| stored.data.clone()))
    }

    async fn save(&self, key: EntityKey, data: serde_json::Value) -> Result<(), IndexerError> {
        let mut state = self.state.write().await;
        if let Some(existing) = state.entities.get_mut(&key) {
            existing.data = data;
            return Ok(());
        }
        let seq = state.next_seq;
        state.next_seq = seq.saturating_add(1);
        state.entities.insert(key, StoredEntity { seq, data });
        Ok(())
    }

    async fn list(
        &self,
        deployment: Deployment,
        entity_type: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<serde_json::Value>, IndexerError> {
        let state = self.state.read().await;
        let mut matching: Vec<&StoredEntity> = state
            .entities
            .iter()
            .filter(|(key, _)| key.deployment == deployment && key.entity_type == entity_type)
            .map(|(_, stored)| stored)
            .collect();
        matching.sort_by_key(|stored| stored.seq);

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|stored| stored.data.clone())
            .collect())
    }

    async fn count(&self, deployment: Deployment, entity_type: &str) -> Result<u64, IndexerError> {
        let state = self.state.read().await;
        let count = state
            .entities
            .keys()
            .filter(|key| key.deployment == deployment && key.entity_type == entity_type)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn key(deployment: Deployment, entity_type: &str, id: &str) -> EntityKey {
        EntityKey::new(deployment, entity_type, id)
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let store = InMemoryStore::new();
        let result = store.load(&key(Deployment::Vsn, "Mint", "0x01")).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn save_is_upsert() {
        let store = InMemoryStore::new();
        let k = key(Deployment::Vsn, "CumulativeSupplyStats", "cumulative");

        let _ = store.save(k.clone(), serde_json::json!({ "n": 1 })).await;
        let _ = store.save(k.clone(), serde_json::json!({ "n": 2 })).await;

        assert_eq!(store.len().await, 1);
        let Ok(Some(data)) = store.load(&k).await else {
            panic!("entity should exist");
        };
        assert_eq!(data["n"], 2);
    }

    #[tokio::test]
    async fn deployments_are_separate_namespaces() {
        let store = InMemoryStore::new();
        let _ = store
            .save(key(Deployment::Vsn, "Approval", "0x01"), serde_json::json!({}))
            .await;

        let other = store.load(&key(Deployment::Svsn, "Approval", "0x01")).await;
        assert!(matches!(other, Ok(None)));
        assert!(matches!(store.count(Deployment::Svsn, "Approval").await, Ok(0)));
        assert!(matches!(store.count(Deployment::Vsn, "Approval").await, Ok(1)));
    }

    #[tokio::test]
    async fn list_keeps_first_write_order_and_paginates() {
        let store = InMemoryStore::new();
        for id in ["c", "a", "b"] {
            let _ = store
                .save(key(Deployment::Vsn, "Transfer", id), serde_json::json!({ "id": id }))
                .await;
        }
        // Re-saving must not move "c" to the end.
        let _ = store
            .save(key(Deployment::Vsn, "Transfer", "c"), serde_json::json!({ "id": "c" }))
            .await;

        let Ok(all) = store.list(Deployment::Vsn, "Transfer", 0, 10).await else {
            panic!("list failed");
        };
        let ids: Vec<_> = all.iter().filter_map(|v| v["id"].as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        let Ok(page) = store.list(Deployment::Vsn, "Transfer", 1, 1).await else {
            panic!("list failed");
        };
        assert_eq!(page.len(), 1);
        assert_eq!(page.first().and_then(|v| v["id"].as_str()), Some("a"));
    }
}
