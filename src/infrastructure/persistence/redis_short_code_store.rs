//! Redis-backed short code store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Value, aio::ConnectionManager};
use tracing::{debug, info};

use crate::config::mask_connection_string;
use crate::domain::entities::ShortCodeRecord;
use crate::domain::repositories::ShortCodeStore;
use crate::error::StoreError;

/// Document store keeping one JSON document per short code.
///
/// Records live under `short_code:<code>`. Inserts use `SET ... NX`, so Redis
/// itself rejects a second writer for the same code.
pub struct RedisShortCodeStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisShortCodeStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to Redis at {}", mask_connection_string(redis_url));

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Transport(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Transport(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Transport(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "short_code:".to_string(),
        })
    }

    fn build_key(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }
}

#[async_trait]
impl ShortCodeStore for RedisShortCodeStore {
    async fn exists(&self, short_code: &str) -> Result<bool, StoreError> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        Ok(conn.exists::<_, bool>(&key).await?)
    }

    async fn insert(&self, record: ShortCodeRecord) -> Result<ShortCodeRecord, StoreError> {
        let key = self.build_key(&record.short_code);
        let document = serde_json::to_string(&record)?;
        let mut conn = self.client.clone();

        let reply: Value = redis::cmd("SET")
            .arg(&key)
            .arg(document)
            .arg("NX")
            .query_async(&mut conn)
            .await?;

        if matches!(reply, Value::Nil) {
            debug!("Redis SET NX rejected existing key {}", key);
            return Err(StoreError::UniqueConstraintViolation {
                short_code: record.short_code,
            });
        }

        Ok(record)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortCodeRecord>, StoreError> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await? {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_connect_log_masks_password() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        // Nothing listens on port 1; only the log line before connecting matters.
        let _ = tokio::time::timeout(
            Duration::from_millis(200),
            RedisShortCodeStore::connect("redis://:hunter2secret@127.0.0.1:1/0"),
        )
        .await;

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Connecting to Redis at redis://:***@127.0.0.1:1/0"));
        assert!(!output.contains("hunter2secret"));
    }
}
