//! Short code store implementations.
//!
//! Concrete implementations of [`ShortCodeStore`]:
//!
//! - [`PgShortCodeStore`] - PostgreSQL table with a unique constraint on `short_code`
//! - [`RedisShortCodeStore`] - One JSON document per code, inserted with `SET NX`
//! - [`InMemoryShortCodeStore`] - Process-local map for development and tests
//!
//! [`connect_store`] picks one from [`Config::store_backend`].

pub mod memory_short_code_store;
pub mod pg_short_code_store;
pub mod redis_short_code_store;

pub use memory_short_code_store::InMemoryShortCodeStore;
pub use pg_short_code_store::PgShortCodeStore;
pub use redis_short_code_store::RedisShortCodeStore;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::ShortCodeStore;

/// Connects to the configured backend.
///
/// # Errors
///
/// Returns an error if the backend's URL is missing or the connection fails.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn ShortCodeStore>> {
    let store: Arc<dyn ShortCodeStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;

            let store = PgShortCodeStore::connect(
                database_url,
                config.db_max_connections,
                config.db_connect_timeout(),
            )
            .await
            .context("Failed to connect to PostgreSQL")?;
            Arc::new(store)
        }
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis backend")?;

            let store = RedisShortCodeStore::connect(redis_url)
                .await
                .context("Failed to connect to Redis")?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on exit");
            Arc::new(InMemoryShortCodeStore::new())
        }
    };

    tracing::info!("Store ready ({})", config.store_backend);
    Ok(store)
}
