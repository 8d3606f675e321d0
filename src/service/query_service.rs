//! Query service: read access to stored entities.

use crate::domain::{Deployment, EntityKey};
use crate::error::IndexerError;
use crate::persistence::EntityStore;
use crate::reducer::entity_types;

/// Largest page the list endpoint returns.
pub const MAX_PER_PAGE: u32 = 100;

/// One page of entities.
#[derive(Debug, Clone)]
pub struct EntityPage {
    /// Entities on this page, in first-write order.
    pub items: Vec<serde_json::Value>,
    /// Total entities of the requested type.
    pub total: u64,
    /// Page number, starting at 1.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
}

/// Read-only view over the entity store.
#[derive(Debug, Clone)]
pub struct QueryService<S> {
    store: S,
}

impl<S: EntityStore> QueryService<S> {
    /// Creates a query service over `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists one entity type, paginated.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::InvalidRequest`] if the deployment has no such
    /// entity type or the pagination is out of range, and
    /// [`IndexerError::Store`] on backend failure.
    pub async fn list(
        &self,
        deployment: Deployment,
        entity_type: &str,
        page: u32,
        per_page: u32,
    ) -> Result<EntityPage, IndexerError> {
        ensure_entity_type(deployment, entity_type)?;
        if page == 0 {
            return Err(IndexerError::InvalidRequest("page starts at 1".to_string()));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(IndexerError::InvalidRequest(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }

        let offset = u64::from(page - 1).saturating_mul(u64::from(per_page));
        let items = self
            .store
            .list(deployment, entity_type, offset, u64::from(per_page))
            .await?;
        let total = self.store.count(deployment, entity_type).await?;

        Ok(EntityPage {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Fetches a single entity.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::EntityNotFound`] if nothing is stored under the
    /// key, [`IndexerError::InvalidRequest`] for an unknown entity type, and
    /// [`IndexerError::Store`] on backend failure.
    pub async fn get(
        &self,
        deployment: Deployment,
        entity_type: &str,
        id: &str,
    ) -> Result<serde_json::Value, IndexerError> {
        ensure_entity_type(deployment, entity_type)?;
        let key = EntityKey::new(deployment, entity_type, id);
        self.store
            .load(&key)
            .await?
            .ok_or_else(|| IndexerError::EntityNotFound {
                entity_type: entity_type.to_string(),
                id: id.to_string(),
            })
    }
}

fn ensure_entity_type(deployment: Deployment, entity_type: &str) -> Result<(), IndexerError> {
    if entity_types(deployment).contains(&entity_type) {
        Ok(())
    } else {
        Err(IndexerError::InvalidRequest(format!(
            "deployment '{deployment}' has no entity type '{entity_type}'"
        )))
    }
}
