//! Instructor assignment endpoints.
//!
//! PUT /assignments/:instructor_id/:course_id/status - Move an assignment.

use crate::error::ApiLifecycleError;
use crate::models::{AssignmentResponse, SetAssignmentStatusRequest};
use axum::{extract::Path, Extension, Json};
use campus_core::{AccountId, CourseId};
use campus_lifecycle::{IdentityContext, LifecycleEngine};
use std::sync::Arc;

/// Moves an instructor assignment to a new status.
///
/// Activation requires the target account to be an approved instructor.
#[utoipa::path(
    put,
    path = "/assignments/{instructor_id}/{course_id}/status",
    params(
        ("instructor_id" = String, Path, description = "Instructor account ID"),
        ("course_id" = String, Path, description = "Course ID"),
    ),
    request_body = SetAssignmentStatusRequest,
    responses(
        (status = 200, description = "Status applied (changed=false when it already held)", body = AssignmentResponse),
        (status = 400, description = "Invalid ID"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No assignment for this pair"),
        (status = 409, description = "Illegal transition (revoked is terminal)"),
        (status = 412, description = "Target account is not an approved instructor"),
    ),
    tag = "Assignments"
)]
pub async fn set_assignment_status_handler(
    Extension(ctx): Extension<IdentityContext>,
    Extension(engine): Extension<Arc<LifecycleEngine>>,
    Path((instructor_id, course_id)): Path<(String, String)>,
    Json(request): Json<SetAssignmentStatusRequest>,
) -> Result<Json<AssignmentResponse>, ApiLifecycleError> {
    let instructor_id: AccountId = instructor_id
        .parse()
        .map_err(|_| ApiLifecycleError::Validation("Invalid instructor ID format".to_string()))?;
    let course_id: CourseId = course_id
        .parse()
        .map_err(|_| ApiLifecycleError::Validation("Invalid course ID format".to_string()))?;

    tracing::info!(
        admin_id = %ctx.id,
        instructor_id = %instructor_id,
        course_id = %course_id,
        status = %request.status,
        "Setting assignment status"
    );

    let outcome = engine
        .set_assignment_status(&ctx, instructor_id, course_id, request.status)
        .await?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    // Handler tests require a database; see tests/route_tests.rs.
}
