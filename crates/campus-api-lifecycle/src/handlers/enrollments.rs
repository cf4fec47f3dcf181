//! Enrollment transition and removal endpoints.
//!
//! PUT /enrollments/:student_id/:course_id/status - Move an enrollment.
//! DELETE /enrollments/:student_id/:course_id - Unenroll (hard delete).

use crate::error::ApiLifecycleError;
use crate::models::{EnrollmentResponse, SetEnrollmentStatusRequest};
use axum::{extract::Path, http::StatusCode, Extension, Json};
use campus_core::{AccountId, CourseId};
use campus_lifecycle::{IdentityContext, LifecycleEngine};
use std::sync::Arc;

fn parse_pair(
    student_id: &str,
    course_id: &str,
) -> Result<(AccountId, CourseId), ApiLifecycleError> {
    let student_id = student_id
        .parse()
        .map_err(|_| ApiLifecycleError::Validation("Invalid student ID format".to_string()))?;
    let course_id = course_id
        .parse()
        .map_err(|_| ApiLifecycleError::Validation("Invalid course ID format".to_string()))?;
    Ok((student_id, course_id))
}

/// Moves an enrollment to a new status.
///
/// Admins may request any legal transition; a student may cancel their own
/// enrollment and nothing else. The request carries the status the caller
/// observed; a row that raced elsewhere yields 409.
#[utoipa::path(
    put,
    path = "/enrollments/{student_id}/{course_id}/status",
    params(
        ("student_id" = String, Path, description = "Student account ID"),
        ("course_id" = String, Path, description = "Course ID"),
    ),
    request_body = SetEnrollmentStatusRequest,
    responses(
        (status = 200, description = "Status applied (changed=false when it already held)", body = EnrollmentResponse),
        (status = 400, description = "Invalid ID"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller may not transition this enrollment"),
        (status = 404, description = "No enrollment for this pair"),
        (status = 409, description = "Row moved past the expected status, or the transition is illegal"),
    ),
    tag = "Enrollments"
)]
pub async fn set_enrollment_status_handler(
    Extension(ctx): Extension<IdentityContext>,
    Extension(engine): Extension<Arc<LifecycleEngine>>,
    Path((student_id, course_id)): Path<(String, String)>,
    Json(request): Json<SetEnrollmentStatusRequest>,
) -> Result<Json<EnrollmentResponse>, ApiLifecycleError> {
    let (student_id, course_id) = parse_pair(&student_id, &course_id)?;

    tracing::info!(
        caller_id = %ctx.id,
        student_id = %student_id,
        course_id = %course_id,
        expected = %request.expected,
        status = %request.status,
        "Setting enrollment status"
    );

    let outcome = engine
        .set_enrollment_status(&ctx, student_id, course_id, request.expected, request.status)
        .await?;
    Ok(Json(outcome.into()))
}

/// Hard-deletes an enrollment.
///
/// Irreversible and distinct from cancellation: the row (and any cancelled
/// history for the pair) is removed.
#[utoipa::path(
    delete,
    path = "/enrollments/{student_id}/{course_id}",
    params(
        ("student_id" = String, Path, description = "Student account ID"),
        ("course_id" = String, Path, description = "Course ID"),
    ),
    responses(
        (status = 204, description = "Enrollment removed"),
        (status = 400, description = "Invalid ID"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No enrollment for this pair"),
    ),
    tag = "Enrollments"
)]
pub async fn remove_enrollment_handler(
    Extension(ctx): Extension<IdentityContext>,
    Extension(engine): Extension<Arc<LifecycleEngine>>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiLifecycleError> {
    let (student_id, course_id) = parse_pair(&student_id, &course_id)?;

    tracing::info!(
        admin_id = %ctx.id,
        student_id = %student_id,
        course_id = %course_id,
        "Removing enrollment"
    );

    engine
        .remove_enrollment(&ctx, student_id, course_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    // Handler tests require a database; see tests/route_tests.rs.
}
