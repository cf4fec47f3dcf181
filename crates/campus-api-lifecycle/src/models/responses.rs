//! Response models for the lifecycle API.
//!
//! Every mutation response carries a `changed` flag: a requested state that
//! already held is a 200 with `changed: false` and the unchanged entity.

use campus_db::{
    Account, AccountRole, AccountStatus, AssignmentStatus, Enrollment, EnrollmentStatus,
    InstructorAssignment,
};
use campus_lifecycle::{Outcome, ReadAck};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account state returned from approval/activation endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Unique identifier for the account.
    pub id: Uuid,

    /// Platform role.
    pub role: AccountRole,

    /// Whether the account is approved.
    pub is_approved: bool,

    /// Whether the account is active.
    pub active: bool,

    /// Coarse lifecycle status.
    pub account_status: AccountStatus,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,

    /// Whether this request wrote anything.
    pub changed: bool,
}

impl From<Outcome<Account>> for AccountResponse {
    fn from(outcome: Outcome<Account>) -> Self {
        let changed = outcome.changed();
        let account = outcome.into_entity();
        Self {
            id: account.id,
            role: account.role,
            is_approved: account.is_approved,
            active: account.active,
            account_status: account.account_status,
            updated_at: account.updated_at,
            changed,
        }
    }
}

/// Enrollment state returned from enrollment endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    /// Unique identifier for the enrollment row.
    pub id: Uuid,

    /// The enrolled student.
    pub student_id: Uuid,

    /// The course.
    pub course_id: Uuid,

    /// Current status.
    pub status: EnrollmentStatus,

    /// When the enrollment was requested.
    pub enrollment_date: DateTime<Utc>,

    /// Whether this request wrote anything.
    pub changed: bool,
}

impl From<Outcome<Enrollment>> for EnrollmentResponse {
    fn from(outcome: Outcome<Enrollment>) -> Self {
        let changed = outcome.changed();
        let enrollment = outcome.into_entity();
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            status: enrollment.status,
            enrollment_date: enrollment.enrollment_date,
            changed,
        }
    }
}

/// Assignment state returned from assignment endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssignmentResponse {
    /// Unique identifier for the assignment row.
    pub id: Uuid,

    /// The assigned instructor.
    pub instructor_id: Uuid,

    /// The course.
    pub course_id: Uuid,

    /// Free-form role descriptor.
    pub role: String,

    /// Current status.
    pub status: AssignmentStatus,

    /// Whether this request wrote anything.
    pub changed: bool,
}

impl From<Outcome<InstructorAssignment>> for AssignmentResponse {
    fn from(outcome: Outcome<InstructorAssignment>) -> Self {
        let changed = outcome.changed();
        let assignment = outcome.into_entity();
        Self {
            id: assignment.id,
            instructor_id: assignment.instructor_id,
            course_id: assignment.course_id,
            role: assignment.role,
            status: assignment.status,
            changed,
        }
    }
}

/// Acknowledgment receipt for a read mark.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReadAckResponse {
    /// The acknowledging account.
    pub subject_id: Uuid,

    /// The acknowledged event.
    pub event_id: Uuid,

    /// When the first acknowledgment arrived.
    pub read_at: DateTime<Utc>,

    /// Whether this request created the mark. False for duplicates.
    pub newly_marked: bool,
}

impl From<ReadAck> for ReadAckResponse {
    fn from(ack: ReadAck) -> Self {
        Self {
            subject_id: ack.mark.subject_id,
            event_id: ack.mark.event_id,
            read_at: ack.mark.read_at,
            newly_marked: ack.newly_marked,
        }
    }
}

/// Unread notification count for the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    /// Number of notifications without a read mark.
    pub unread: i64,
}
