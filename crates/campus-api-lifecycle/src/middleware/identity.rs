//! Identity and admin guards.
//!
//! The gateway's authentication layer resolves each request to an
//! [`IdentityContext`] and inserts it into the request extensions before the
//! router sees it. These guards only check that the context is there and,
//! for admin routes, that it carries the admin role; the engine re-validates
//! authorization on every operation.

use crate::error::ApiLifecycleError;
use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use campus_lifecycle::IdentityContext;

/// Middleware that requires a resolved identity on the request.
///
/// # Errors
///
/// - `ApiLifecycleError::Unauthorized` (401): no identity context present
pub async fn require_identity(
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiLifecycleError> {
    if request.extensions().get::<IdentityContext>().is_none() {
        return Err(ApiLifecycleError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Middleware that requires the caller to be an active admin.
///
/// # Errors
///
/// - `ApiLifecycleError::Unauthorized` (401): no identity context present
/// - `ApiLifecycleError::Lifecycle(Forbidden)` (403): caller is not an
///   active admin
pub async fn admin_guard(
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiLifecycleError> {
    let ctx = request
        .extensions()
        .get::<IdentityContext>()
        .ok_or(ApiLifecycleError::Unauthorized)?;

    if !ctx.is_admin() || !ctx.active {
        tracing::warn!(
            caller_id = %ctx.id,
            role = ?ctx.role,
            "Access denied: admin role required"
        );
        return Err(campus_lifecycle::LifecycleError::Forbidden.into());
    }

    Ok(next.run(request).await)
}
