//! Persistence layer: the entity store.
//!
//! Provides the [`EntityStore`] trait, a keyed document store addressed by
//! `(deployment, entity type, id)` with upsert semantics. Two backends
//! exist: [`InMemoryStore`] for tests and ephemeral runs, and
//! [`PostgresStore`] using `sqlx::PgPool`. [`Store`] selects one at
//! startup.

pub mod memory;
pub mod postgres;

use std::future::Future;

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::domain::{Deployment, Entity, EntityChange, EntityKey};
use crate::error::IndexerError;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Keyed entity storage.
///
/// `save` is an upsert keyed by the full [`EntityKey`]. `list` returns
/// entities of one type in first-write order; re-saving an entity does not
/// move it.
pub trait EntityStore: Send + Sync {
    /// Loads the entity stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Store`] if the backend is unavailable.
    fn load(
        &self,
        key: &EntityKey,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, IndexerError>> + Send;

    /// Inserts or replaces the entity stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Store`] if the backend is unavailable.
    fn save(
        &self,
        key: EntityKey,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<(), IndexerError>> + Send;

    /// Lists entities of one type, skipping `offset` and returning at most
    /// `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Store`] if the backend is unavailable.
    fn list(
        &self,
        deployment: Deployment,
        entity_type: &str,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, IndexerError>> + Send;

    /// Counts entities of one type.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Store`] if the backend is unavailable.
    fn count(
        &self,
        deployment: Deployment,
        entity_type: &str,
    ) -> impl Future<Output = Result<u64, IndexerError>> + Send;
}

/// Loads and deserializes a typed entity.
///
/// # Errors
///
/// Returns [`IndexerError::Store`] on backend failure and
/// [`IndexerError::Internal`] if the stored document does not match `T`.
pub async fn load_entity<S, T>(store: &S, key: &EntityKey) -> Result<Option<T>, IndexerError>
where
    S: EntityStore,
    T: DeserializeOwned,
{
    let Some(data) = store.load(key).await? else {
        return Ok(None);
    };
    serde_json::from_value(data).map(Some).map_err(|e| {
        IndexerError::Internal(format!(
            "stored {} '{}' is malformed: {e}",
            key.entity_type, key.id
        ))
    })
}

/// Serializes and saves an entity, returning the change to broadcast.
///
/// # Errors
///
/// Returns [`IndexerError::Store`] on backend failure.
pub async fn save_entity<S>(
    store: &S,
    deployment: Deployment,
    entity: &dyn Entity,
) -> Result<EntityChange, IndexerError>
where
    S: EntityStore,
{
    let entity_type = entity.entity_type();
    let id = entity.id();
    let data = entity.to_json()?;

    store
        .save(EntityKey::new(deployment, entity_type, id.clone()), data.clone())
        .await?;

    Ok(EntityChange {
        deployment,
        entity_type: entity_type.to_string(),
        id,
        data,
        timestamp: Utc::now(),
    })
}

/// Runtime-selected store backend.
#[derive(Debug, Clone)]
pub enum Store {
    /// Process-local map.
    Memory(InMemoryStore),
    /// PostgreSQL.
    Postgres(PostgresStore),
}

impl Store {
    /// Short backend name for logs and health output.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

impl EntityStore for Store {
    async fn load(&self, key: &EntityKey) -> Result<Option<serde_json::Value>, IndexerError> {
        match self {
            Self::Memory(store) => store.load(key).await,
            Self::Postgres(store) => store.load(key).await,
        }
    }

    async fn save(&self, key: EntityKey, data: serde_json::Value) -> Result<(), IndexerError> {
        match self {
            Self::Memory(store) => store.save(key, data).await,
            Self::Postgres(store) => store.save(key, data).await,
        }
    }

    async fn list(
        &self,
        deployment: Deployment,
        entity_type: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<serde_json::Value>, IndexerError> {
        match self {
            Self::Memory(store) => store.list(deployment, entity_type, offset, limit).await,
            Self::Postgres(store) => store.list(deployment, entity_type, offset, limit).await,
        }
    }

    async fn count(&self, deployment: Deployment, entity_type: &str) -> Result<u64, IndexerError> {
        match self {
            Self::Memory(store) => store.count(deployment, entity_type).await,
            Self::Postgres(store) => store.count(deployment, entity_type).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::CumulativeSupplyStats;
    use crate::domain::aggregates::CUMULATIVE_STATS_ID;

    #[tokio::test]
    async fn typed_round_trip_through_store() {
        let store = Store::Memory(InMemoryStore::new());
        let stats = CumulativeSupplyStats::zero();

        let Ok(change) = save_entity(&store, Deployment::Vsn, &stats).await else {
            panic!("save failed");
        };
        assert_eq!(change.entity_type, "CumulativeSupplyStats");
        assert_eq!(change.id, CUMULATIVE_STATS_ID);

        let key = EntityKey::new(
            Deployment::Vsn,
            CumulativeSupplyStats::ENTITY_TYPE,
            CUMULATIVE_STATS_ID,
        );
        let Ok(Some(loaded)) = load_entity::<_, CumulativeSupplyStats>(&store, &key).await else {
            panic!("load failed");
        };
        assert_eq!(loaded, stats);
    }

    #[tokio::test]
    async fn malformed_document_is_internal_error() {
        let store = InMemoryStore::new();
        let key = EntityKey::new(
            Deployment::Vsn,
            CumulativeSupplyStats::ENTITY_TYPE,
            CUMULATIVE_STATS_ID,
        );
        let saved = store
            .save(key.clone(), serde_json::json!({ "id": "cumulative" }))
            .await;
        assert!(saved.is_ok());

        let result = load_entity::<_, CumulativeSupplyStats>(&store, &key).await;
        assert!(matches!(result, Err(IndexerError::Internal(_))));
    }

    #[test]
    fn backend_names() {
        assert_eq!(Store::Memory(InMemoryStore::new()).backend(), "memory");
    }
}
