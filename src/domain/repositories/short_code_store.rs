//! Store interface consumed by the uniqueness resolver.

use crate::domain::entities::ShortCodeRecord;
use crate::error::StoreError;
use async_trait::async_trait;

/// Persistence backend keyed by short code.
///
/// Backends must enforce uniqueness of `short_code` themselves (a unique
/// constraint, or an atomic insert-if-absent). The resolver relies on that to
/// close the gap between [`exists`](Self::exists) and [`insert`](Self::insert).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortCodeStore`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::RedisShortCodeStore`] - One Redis document per code
/// - [`crate::infrastructure::persistence::InMemoryShortCodeStore`] - Process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortCodeStore: Send + Sync {
    /// Checks whether a record with this short code exists.
    ///
    /// # Errors
    ///
    /// Absence is `Ok(false)`, never an error. Returns
    /// [`StoreError::Transport`] when the backend cannot answer.
    async fn exists(&self, short_code: &str) -> Result<bool, StoreError>;

    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueConstraintViolation`] if the short code is
    /// already taken, [`StoreError::Transport`] on backend failures.
    async fn insert(&self, record: ShortCodeRecord) -> Result<ShortCodeRecord, StoreError>;

    /// Finds a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] on backend failures.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortCodeRecord>, StoreError>;
}
