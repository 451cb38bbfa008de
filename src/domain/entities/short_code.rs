//! Short code record and the transient attempt that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted mapping from a unique short code to its original URL.
///
/// `short_code` is unique across the store; `original_url` may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortCodeRecord {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortCodeRecord {
    /// Creates a record stamped with the current time.
    pub fn new(original_url: impl Into<String>, short_code: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            original_url: original_url.into(),
            short_code: short_code.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One candidate tried during a single resolution. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationAttempt {
    pub base_input: String,
    pub length_extension: usize,
    pub candidate_code: String,
}
