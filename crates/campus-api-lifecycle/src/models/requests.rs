//! Request models for the lifecycle API.

use campus_db::{AssignmentStatus, EnrollmentStatus};
use serde::Deserialize;
use utoipa::ToSchema;

/// Grant or revoke approval for an account.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetApprovalRequest {
    /// True to approve, false to revoke (which also deactivates).
    pub approve: bool,
}

/// Switch an account on or off.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    /// True to activate (requires prior approval), false to deactivate.
    pub active: bool,
}

/// Move an enrollment to a new status.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetEnrollmentStatusRequest {
    /// The status the caller observed before requesting the change. A row
    /// that has since moved elsewhere yields 409.
    pub expected: EnrollmentStatus,
    /// The requested status.
    pub status: EnrollmentStatus,
}

/// Move an instructor assignment to a new status.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetAssignmentStatusRequest {
    /// The requested status.
    pub status: AssignmentStatus,
}
