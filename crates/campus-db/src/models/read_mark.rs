//! `ReadMark` model for idempotent read acknowledgment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Record that a subject (user) has acknowledged an event.
///
/// At most one row exists per (subject, event) pair, regardless of how many
/// times the acknowledgment is submitted. Rows are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ReadMark {
    /// Primary key.
    pub id: Uuid,
    /// The acknowledging account.
    pub subject_id: Uuid,
    /// The notification or message being acknowledged.
    pub event_id: Uuid,
    /// When the first acknowledgment arrived.
    pub read_at: DateTime<Utc>,
}

impl ReadMark {
    /// Record an acknowledgment.
    ///
    /// Uses INSERT with ON CONFLICT DO NOTHING so concurrent duplicate
    /// submissions cannot produce two rows or fail the second caller.
    /// Returns true if this call inserted the mark, false if it already
    /// existed.
    pub async fn mark(
        pool: &sqlx::PgPool,
        subject_id: Uuid,
        event_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r"
            INSERT INTO read_marks (subject_id, event_id)
            VALUES ($1, $2)
            ON CONFLICT (subject_id, event_id) DO NOTHING
            ",
        )
        .bind(subject_id)
        .bind(event_id)
        .execute(pool)
        .await?;

        // rows_affected = 1 means we inserted, 0 means the mark already existed
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the mark for a (subject, event) pair.
    pub async fn find_by_pair(
        pool: &sqlx::PgPool,
        subject_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM read_marks
            WHERE subject_id = $1 AND event_id = $2
            ",
        )
        .bind(subject_id)
        .bind(event_id)
        .fetch_optional(pool)
        .await
    }

    /// Check whether a subject has acknowledged an event.
    pub async fn is_read(
        pool: &sqlx::PgPool,
        subject_id: Uuid,
        event_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result: (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS(
                SELECT 1 FROM read_marks
                WHERE subject_id = $1 AND event_id = $2
            )
            ",
        )
        .bind(subject_id)
        .bind(event_id)
        .fetch_one(pool)
        .await?;

        Ok(result.0)
    }

    /// Count notifications the subject has not yet acknowledged.
    pub async fn unread_count(pool: &sqlx::PgPool, subject_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM notifications n
            WHERE NOT EXISTS (
                SELECT 1 FROM read_marks rm
                WHERE rm.event_id = n.id AND rm.subject_id = $1
            )
            ",
        )
        .bind(subject_id)
        .fetch_one(pool)
        .await
    }
}
