//! Unique short code resolution with bounded retry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::entities::{DerivationAttempt, ShortCodeRecord};
use crate::domain::repositories::ShortCodeStore;
use crate::error::{ResolveError, StoreError};
use crate::utils::code_deriver::{derive, random_suffix};

/// Default deadline applied to every store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Derives short codes and commits the first one the store accepts.
///
/// Each collision perturbs the URL with a fresh random suffix and lengthens
/// the code by one character, so the candidate space grows on every retry.
/// A unique-constraint violation on insert (another writer claimed the code
/// between the existence check and the insert) counts as a collision.
///
/// The resolver holds no mutable state; share it behind an `Arc` across tasks.
pub struct UniquenessResolver<S: ShortCodeStore + ?Sized> {
    store: Arc<S>,
    store_timeout: Duration,
}

impl<S: ShortCodeStore + ?Sized> UniquenessResolver<S> {
    /// Creates a resolver over a store handle.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets the deadline for each individual store call.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Creates a record with a short code not present in the store.
    ///
    /// Makes at most `max_retries + 1` attempts. Exactly one insert succeeds
    /// on the `Ok` path.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidInput`] for an empty URL, before any store access
    /// - [`ResolveError::CollisionExhausted`] when every attempt collided
    /// - [`ResolveError::Store`] on transport failures or store timeouts (not retried)
    /// - [`ResolveError::Cancelled`] once `cancel` fires
    pub async fn create_unique(
        &self,
        original_url: &str,
        max_retries: u32,
        cancel: &CancellationToken,
    ) -> Result<ShortCodeRecord, ResolveError> {
        if original_url.trim().is_empty() {
            return Err(ResolveError::InvalidInput(
                "original URL must not be empty".to_string(),
            ));
        }

        let mut attempt = DerivationAttempt {
            base_input: original_url.to_string(),
            length_extension: 0,
            candidate_code: derive(original_url, 0),
        };
        let mut retries_used: u32 = 0;

        loop {
            debug!(
                "Checking candidate {} (extension {}) for {}",
                attempt.candidate_code, attempt.length_extension, original_url
            );

            let taken = self
                .call(cancel, self.store.exists(&attempt.candidate_code))
                .await??;

            if taken {
                debug!("Collision on {}", attempt.candidate_code);
            } else {
                let record = ShortCodeRecord::new(original_url, attempt.candidate_code.clone());

                match self.call(cancel, self.store.insert(record)).await? {
                    Ok(record) => {
                        info!(
                            "Created short code {} for {} after {} retries",
                            record.short_code, record.original_url, retries_used
                        );
                        return Ok(record);
                    }
                    Err(e) if e.is_retriable() => {
                        warn!(
                            "Short code {} was claimed between check and insert",
                            attempt.candidate_code
                        );
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            if retries_used >= max_retries {
                warn!(
                    "Giving up on {} after {} attempts",
                    original_url,
                    retries_used.saturating_add(1)
                );
                return Err(ResolveError::CollisionExhausted {
                    original_url: original_url.to_string(),
                    attempts: retries_used.saturating_add(1),
                });
            }

            retries_used += 1;
            attempt = Self::retry_attempt(original_url, retries_used)?;
        }
    }

    /// Reports whether `short_code` is already taken.
    ///
    /// # Errors
    ///
    /// Same as [`Self::lookup`].
    pub async fn is_taken(
        &self,
        short_code: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, ResolveError> {
        if short_code.is_empty() {
            return Err(ResolveError::InvalidInput(
                "short code must not be empty".to_string(),
            ));
        }

        Ok(self.call(cancel, self.store.exists(short_code)).await??)
    }

    /// Looks up the record stored under `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidInput`] for an empty code, otherwise the
    /// same store, timeout, and cancellation errors as [`Self::create_unique`].
    pub async fn lookup(
        &self,
        short_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<ShortCodeRecord>, ResolveError> {
        if short_code.is_empty() {
            return Err(ResolveError::InvalidInput(
                "short code must not be empty".to_string(),
            ));
        }

        Ok(self
            .call(cancel, self.store.find_by_code(short_code))
            .await??)
    }

    /// Builds the candidate for the `retry`-th retry (1-based).
    fn retry_attempt(original_url: &str, retry: u32) -> Result<DerivationAttempt, ResolveError> {
        let suffix = random_suffix().map_err(|e| ResolveError::Entropy(e.to_string()))?;
        let base_input = format!("{original_url}{suffix}");
        let length_extension = retry as usize;
        let candidate_code = derive(&base_input, length_extension);

        Ok(DerivationAttempt {
            base_input,
            length_extension,
            candidate_code,
        })
    }

    /// Runs one store call under the cancellation token and the store deadline.
    ///
    /// The outer error is the interruption; the inner result is the store's answer.
    async fn call<T>(
        &self,
        cancel: &CancellationToken,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<Result<T, StoreError>, ResolveError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ResolveError::Cancelled),
            outcome = tokio::time::timeout(self.store_timeout, op) => {
                Ok(outcome.unwrap_or(Err(StoreError::Timeout(self.store_timeout))))
            }
        }
    }
}
