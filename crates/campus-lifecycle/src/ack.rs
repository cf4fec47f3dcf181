//! Idempotent read-acknowledgment store.
//!
//! Records "user X has seen event Y" with at-most-one-row-per-pair
//! semantics. The mechanism is the storage layer's conflict-safe upsert:
//! two duplicate delivery retries racing cannot produce two rows, and the
//! second caller still gets a success.

use crate::error::{LifecycleError, Result};
use campus_core::{AccountId, EventId};
use campus_db::ReadMark;
use sqlx::PgPool;
use std::time::Duration;

/// Default upper bound for any single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of acknowledging an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadAck {
    /// The mark on record for the pair.
    pub mark: ReadMark,
    /// Whether this call created the mark. False on duplicate submission.
    pub newly_marked: bool,
}

/// Store for per-user read acknowledgments.
///
/// Exclusively owns `read_marks` rows; nothing else writes them.
#[derive(Debug, Clone)]
pub struct AckStore {
    pool: PgPool,
    store_timeout: Duration,
}

impl AckStore {
    /// Create an ack store with the default store timeout.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Create an ack store with an explicit store timeout.
    #[must_use]
    pub fn with_store_timeout(pool: PgPool, store_timeout: Duration) -> Self {
        Self {
            pool,
            store_timeout,
        }
    }

    /// Record that `subject_id` has seen `event_id`.
    ///
    /// Safe under arbitrary concurrent duplicate submission: every caller
    /// gets a success and exactly one row exists afterwards. Never reports
    /// an error for a duplicate call.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the subject or event does not exist
    /// - `Unavailable` on store timeout
    pub async fn mark_read(&self, subject_id: AccountId, event_id: EventId) -> Result<ReadAck> {
        let op = async {
            let newly_marked =
                ReadMark::mark(&self.pool, *subject_id.as_uuid(), *event_id.as_uuid())
                    .await
                    .map_err(|err| {
                        if LifecycleError::is_foreign_key_violation(&err) {
                            LifecycleError::NotFound {
                                resource: "subject or event",
                            }
                        } else {
                            LifecycleError::from_store(err)
                        }
                    })?;

            // Marks are never deleted, so the row is there whether this call
            // inserted it or lost the race to a duplicate.
            let mark =
                ReadMark::find_by_pair(&self.pool, *subject_id.as_uuid(), *event_id.as_uuid())
                    .await
                    .map_err(LifecycleError::from_store)?
                    .ok_or(LifecycleError::Internal(sqlx::Error::RowNotFound))?;

            if newly_marked {
                tracing::debug!(
                    subject_id = %subject_id,
                    event_id = %event_id,
                    "event acknowledged"
                );
            }

            Ok(ReadAck { mark, newly_marked })
        };

        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| LifecycleError::Unavailable)?
    }

    /// Whether `subject_id` has acknowledged `event_id`.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` on store timeout.
    pub async fn is_read(&self, subject_id: AccountId, event_id: EventId) -> Result<bool> {
        let op = async {
            ReadMark::is_read(&self.pool, *subject_id.as_uuid(), *event_id.as_uuid())
                .await
                .map_err(LifecycleError::from_store)
        };

        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| LifecycleError::Unavailable)?
    }

    /// Number of notifications `subject_id` has not yet acknowledged.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` on store timeout.
    pub async fn unread_count(&self, subject_id: AccountId) -> Result<i64> {
        let op = async {
            ReadMark::unread_count(&self.pool, *subject_id.as_uuid())
                .await
                .map_err(LifecycleError::from_store)
        };

        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| LifecycleError::Unavailable)?
    }
}
