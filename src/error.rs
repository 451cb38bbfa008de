//! Typed errors for short code storage and resolution.
//!
//! Store backends report [`StoreError`]; the resolver wraps anything it cannot
//! recover from into [`ResolveError`]. Only unique-constraint violations are
//! handled locally (as collisions); everything else reaches the caller.

use std::time::Duration;

/// Errors reported by a [`crate::domain::repositories::ShortCodeStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record with this short code is already persisted.
    #[error("short code already exists: {short_code}")]
    UniqueConstraintViolation { short_code: String },

    /// The backend could not be reached or returned an unexpected failure.
    #[error("store transport error: {0}")]
    Transport(String),

    /// The store call did not complete within the configured deadline.
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    /// A stored document could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Returns true when the resolver may retry with a fresh candidate.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::UniqueConstraintViolation { .. })
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Outcome of a failed [`crate::application::services::UniquenessResolver`] call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Rejected before any store access.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Every candidate collided; `attempts` counts the initial try plus retries.
    #[error("could not find a free short code for {original_url} after {attempts} attempts")]
    CollisionExhausted { original_url: String, attempts: u32 },

    /// Non-retriable store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The caller cancelled the operation.
    #[error("short code resolution cancelled")]
    Cancelled,

    /// The OS random number generator failed while building a retry suffix.
    #[error("failed to generate retry suffix: {0}")]
    Entropy(String),
}
