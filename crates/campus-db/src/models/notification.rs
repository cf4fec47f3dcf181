//! Notification entity model.
//!
//! The event side of read acknowledgment. Notifications are plain CRUD; the
//! only lifecycle rule attached to them lives in `read_marks`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A platform notification users can mark as read.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier for the notification.
    pub id: Uuid,

    /// Short headline.
    pub title: String,

    /// Full message body.
    pub body: String,

    /// When the notification was published.
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// Create a new notification.
    pub async fn create(
        pool: &sqlx::PgPool,
        input: &CreateNotification,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO notifications (title, body)
            VALUES ($1, $2)
            RETURNING *
            ",
        )
        .bind(&input.title)
        .bind(&input.body)
        .fetch_one(pool)
        .await
    }

    /// Find a notification by ID.
    pub async fn find_by_id(pool: &sqlx::PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM notifications
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List the most recent notifications.
    pub async fn list_recent(pool: &sqlx::PgPool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM notifications
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
