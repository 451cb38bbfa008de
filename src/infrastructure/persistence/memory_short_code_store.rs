//! Process-local short code store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::ShortCodeRecord;
use crate::domain::repositories::ShortCodeStore;
use crate::error::StoreError;

/// In-memory store using `DashMap`.
///
/// Insert-if-absent goes through the entry API, which holds the shard lock,
/// so concurrent inserts of the same code cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryShortCodeStore {
    storage: DashMap<String, ShortCodeRecord>,
}

impl InMemoryShortCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ShortCodeStore for InMemoryShortCodeStore {
    async fn exists(&self, short_code: &str) -> Result<bool, StoreError> {
        Ok(self.storage.contains_key(short_code))
    }

    async fn insert(&self, record: ShortCodeRecord) -> Result<ShortCodeRecord, StoreError> {
        match self.storage.entry(record.short_code.clone()) {
            Entry::Occupied(_) => Err(StoreError::UniqueConstraintViolation {
                short_code: record.short_code,
            }),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortCodeRecord>, StoreError> {
        Ok(self.storage.get(short_code).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_exists() {
        let store = InMemoryShortCodeStore::new();
        assert!(!store.exists("abcdefgh").await.unwrap());

        store
            .insert(ShortCodeRecord::new("https://example.com", "abcdefgh"))
            .await
            .unwrap();

        assert!(store.exists("abcdefgh").await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_unique_violation() {
        let store = InMemoryShortCodeStore::new();
        store
            .insert(ShortCodeRecord::new("https://example.com/a", "abcdefgh"))
            .await
            .unwrap();

        let result = store
            .insert(ShortCodeRecord::new("https://example.com/b", "abcdefgh"))
            .await;

        assert_eq!(
            result.unwrap_err(),
            StoreError::UniqueConstraintViolation {
                short_code: "abcdefgh".to_string()
            }
        );

        let kept = store.find_by_code("abcdefgh").await.unwrap().unwrap();
        assert_eq!(kept.original_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_same_url_may_repeat() {
        let store = InMemoryShortCodeStore::new();
        store
            .insert(ShortCodeRecord::new("https://example.com", "aaaaaaaa"))
            .await
            .unwrap();
        store
            .insert(ShortCodeRecord::new("https://example.com", "bbbbbbbb"))
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_codes_are_case_sensitive() {
        let store = InMemoryShortCodeStore::new();
        store
            .insert(ShortCodeRecord::new("https://example.com", "AbCdEfGh"))
            .await
            .unwrap();

        assert!(!store.exists("abcdefgh").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_missing_code() {
        let store = InMemoryShortCodeStore::new();
        assert!(store.find_by_code("missing1").await.unwrap().is_none());
        assert!(store.is_empty());
    }
}
