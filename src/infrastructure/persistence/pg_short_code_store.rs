//! PostgreSQL implementation of the short code store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::domain::entities::ShortCodeRecord;
use crate::domain::repositories::ShortCodeStore;
use crate::error::StoreError;
use crate::utils::db_error::{map_insert_error, map_sqlx_error};

/// Embedded schema migrations for the `url_shorteners` table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(sqlx::FromRow)]
struct ShortCodeRow {
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ShortCodeRow> for ShortCodeRecord {
    fn from(row: ShortCodeRow) -> Self {
        Self {
            original_url: row.original_url,
            short_code: row.short_code,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL store backed by the `url_shorteners` table.
///
/// Uniqueness is enforced by the `url_shorteners_short_code_key` constraint;
/// a violation on insert is reported as [`StoreError::UniqueConstraintViolation`].
pub struct PgShortCodeStore {
    pool: Arc<PgPool>,
}

impl PgShortCodeStore {
    /// Creates a new store over an existing connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the database is unreachable or a
    /// migration fails.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        info!("Connected to database");

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Transport(format!("migration failed: {e}")))?;

        Ok(Self::new(Arc::new(pool)))
    }
}

#[async_trait]
impl ShortCodeStore for PgShortCodeStore {
    async fn exists(&self, short_code: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM url_shorteners WHERE short_code = $1)",
        )
        .bind(short_code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn insert(&self, record: ShortCodeRecord) -> Result<ShortCodeRecord, StoreError> {
        let row = sqlx::query_as::<_, ShortCodeRow>(
            r#"
            INSERT INTO url_shorteners (original_url, short_code, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING original_url, short_code, created_at, updated_at
            "#,
        )
        .bind(&record.original_url)
        .bind(&record.short_code)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_insert_error(e, &record.short_code))?;

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortCodeRecord>, StoreError> {
        let row = sqlx::query_as::<_, ShortCodeRow>(
            r#"
            SELECT original_url, short_code, created_at, updated_at
            FROM url_shorteners
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }
}
