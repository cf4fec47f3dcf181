//! Instructor assignment entity model.
//!
//! An (instructor, course) relationship with a role tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

/// Default role descriptor for a new assignment.
pub const DEFAULT_ASSIGNMENT_ROLE: &str = "instructor";

/// Lifecycle status of an instructor assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "assignment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Requested, not yet activated by an admin.
    #[default]
    Pending,
    /// In effect. Only approved instructor accounts may hold this status.
    Active,
    /// Terminal. A revoked assignment never changes again.
    Revoked,
}

impl AssignmentStatus {
    /// Lowercase wire name, matching the Postgres enum label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Active => "active",
            AssignmentStatus::Revoked => "revoked",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An instructor's assignment to a course.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InstructorAssignment {
    /// Unique identifier for the assignment row.
    pub id: Uuid,

    /// The assigned instructor's account ID.
    pub instructor_id: Uuid,

    /// The course being taught.
    pub course_id: Uuid,

    /// Free-form role descriptor (e.g. "instructor", "teaching assistant").
    pub role: String,

    /// Current lifecycle status.
    pub status: AssignmentStatus,

    /// When the assignment was requested.
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new instructor assignment.
#[derive(Debug, Clone)]
pub struct CreateInstructorAssignment {
    pub instructor_id: Uuid,
    pub course_id: Uuid,
    /// Role descriptor; defaults to [`DEFAULT_ASSIGNMENT_ROLE`] when `None`.
    pub role: Option<String>,
}

impl InstructorAssignment {
    /// Create a new assignment row in the pending state.
    ///
    /// Fails with a unique violation if the pair already has an assignment.
    pub async fn create(
        pool: &sqlx::PgPool,
        input: &CreateInstructorAssignment,
    ) -> Result<Self, sqlx::Error> {
        let role = input
            .role
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSIGNMENT_ROLE.to_string());

        sqlx::query_as(
            r"
            INSERT INTO instructor_assignments (instructor_id, course_id, role)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(input.instructor_id)
        .bind(input.course_id)
        .bind(role)
        .fetch_one(pool)
        .await
    }

    /// Find the assignment for an (instructor, course) pair.
    pub async fn find_by_pair(
        pool: &sqlx::PgPool,
        instructor_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM instructor_assignments
            WHERE instructor_id = $1 AND course_id = $2
            ",
        )
        .bind(instructor_id)
        .bind(course_id)
        .fetch_optional(pool)
        .await
    }

    /// Find the assignment for an (instructor, course) pair, locking the row
    /// for the duration of the transaction.
    pub async fn find_by_pair_for_update(
        tx: &mut Transaction<'_, Postgres>,
        instructor_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM instructor_assignments
            WHERE instructor_id = $1 AND course_id = $2
            FOR UPDATE
            ",
        )
        .bind(instructor_id)
        .bind(course_id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// List assignments for a course.
    pub async fn list_by_course(
        pool: &sqlx::PgPool,
        course_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM instructor_assignments
            WHERE course_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Write a new status for an assignment row inside an open transaction.
    pub async fn update_status_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: AssignmentStatus,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE instructor_assignments
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
}
