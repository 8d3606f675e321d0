//! PostgreSQL implementation of the entity store.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::EntityStore;
use crate::config::IndexerConfig;
use crate::domain::{Deployment, EntityKey};
use crate::error::IndexerError;

/// PostgreSQL-backed [`EntityStore`] using `sqlx::PgPool`.
///
/// Entities live in a single `entities` table keyed by
/// `(deployment, entity_type, id)`. Listing order follows the `seq` column,
/// which is assigned on first insert and left alone by upserts.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects using the configured pool settings and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Store`] if the database is unreachable or a
    /// migration fails.
    pub async fn connect(config: &IndexerConfig) -> Result<Self, IndexerError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| IndexerError::Store(format!("migration failed: {e}")))?;

        Ok(Self::new(pool))
    }
}

impl EntityStore for PostgresStore {
    async fn load(&self, key: &EntityKey) -> Result<Option<serde_json::Value>, IndexerError> {
        let row = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT data FROM entities WHERE deployment = $1 AND entity_type = $2 AND id = $3",
        )
        .bind(key.deployment.as_str())
        .bind(&key.entity_type)
        .bind(&key.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn save(&self, key: EntityKey, data: serde_json::Value) -> Result<(), IndexerError> {
        sqlx::query(
            "INSERT INTO entities (deployment, entity_type, id, data) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (deployment, entity_type, id) \
             DO UPDATE SET data = EXCLUDED.data, updated_at = now()",
        )
        .bind(key.deployment.as_str())
        .bind(&key.entity_type)
        .bind(&key.id)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(
        &self,
        deployment: Deployment,
        entity_type: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<serde_json::Value>, IndexerError> {
        let rows = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT data FROM entities WHERE deployment = $1 AND entity_type = $2 \
             ORDER BY seq ASC LIMIT $3 OFFSET $4",
        )
        .bind(deployment.as_str())
        .bind(entity_type)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self, deployment: Deployment, entity_type: &str) -> Result<u64, IndexerError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM entities WHERE deployment = $1 AND entity_type = $2",
        )
        .bind(deployment.as_str())
        .bind(entity_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
