//! Enrollment entity model.
//!
//! A (student, course) relationship with a lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

/// Lifecycle status of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "enrollment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Requested, not yet confirmed (e.g. payment outstanding).
    #[default]
    Pending,
    /// Confirmed and in effect.
    Active,
    /// Terminal. A cancelled row never changes again; re-enrolling creates
    /// a new row.
    Cancelled,
}

impl EnrollmentStatus {
    /// Lowercase wire name, matching the Postgres enum label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student's enrollment in a course.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    /// Unique identifier for the enrollment row.
    pub id: Uuid,

    /// The enrolled student's account ID.
    pub student_id: Uuid,

    /// The course being enrolled in.
    pub course_id: Uuid,

    /// Current lifecycle status.
    pub status: EnrollmentStatus,

    /// When the enrollment was requested.
    pub enrollment_date: DateTime<Utc>,
}

/// Data needed to create a new enrollment.
#[derive(Debug, Clone)]
pub struct CreateEnrollment {
    pub student_id: Uuid,
    pub course_id: Uuid,
    /// Initial status; pending unless the enrollment policy (e.g. payment
    /// confirmation) activates immediately.
    pub status: EnrollmentStatus,
}

impl Enrollment {
    /// Create a new enrollment row.
    ///
    /// Fails with a unique violation if a live (non-cancelled) enrollment
    /// already exists for the pair.
    pub async fn create(
        pool: &sqlx::PgPool,
        input: &CreateEnrollment,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO enrollments (student_id, course_id, status)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(input.student_id)
        .bind(input.course_id)
        .bind(input.status)
        .fetch_one(pool)
        .await
    }

    /// Find the enrollment for a (student, course) pair.
    ///
    /// Prefers the live row when a cancelled historical row coexists with a
    /// re-created one.
    pub async fn find_by_pair(
        pool: &sqlx::PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM enrollments
            WHERE student_id = $1 AND course_id = $2
            ORDER BY (status = 'cancelled') ASC, enrollment_date DESC
            LIMIT 1
            ",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(pool)
        .await
    }

    /// Find the enrollment for a (student, course) pair, locking the row for
    /// the duration of the transaction.
    ///
    /// Prefers the live row when a cancelled historical row coexists with a
    /// re-created one, so transitions always target the current enrollment.
    pub async fn find_by_pair_for_update(
        tx: &mut Transaction<'_, Postgres>,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM enrollments
            WHERE student_id = $1 AND course_id = $2
            ORDER BY (status = 'cancelled') ASC, enrollment_date DESC
            LIMIT 1
            FOR UPDATE
            ",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// List enrollments for a student.
    pub async fn list_by_student(
        pool: &sqlx::PgPool,
        student_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM enrollments
            WHERE student_id = $1
            ORDER BY enrollment_date DESC
            ",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// Write a new status for an enrollment row inside an open transaction.
    pub async fn update_status_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE enrollments
            SET status = $2
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
    }

    /// Hard-delete all enrollment rows for a (student, course) pair.
    ///
    /// This is the unenroll operation: irreversible, removes cancelled
    /// history as well. Returns the number of rows removed.
    pub async fn delete_by_pair(
        pool: &sqlx::PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r"
            DELETE FROM enrollments
            WHERE student_id = $1 AND course_id = $2
            ",
        )
        .bind(student_id)
        .bind(course_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str_matches_postgres_labels() {
        assert_eq!(EnrollmentStatus::Pending.as_str(), "pending");
        assert_eq!(EnrollmentStatus::Active.as_str(), "active");
        assert_eq!(EnrollmentStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_status_display_is_lowercase() {
        assert_eq!(EnrollmentStatus::Cancelled.to_string(), "cancelled");
    }
}
