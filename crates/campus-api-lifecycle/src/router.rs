//! Lifecycle API router configuration.
//!
//! Configures one route per lifecycle operation:
//! - PUT /accounts/:id/approval - Grant or revoke approval (admin)
//! - PUT /accounts/:id/active - Switch an account on or off (admin)
//! - PUT /enrollments/:student_id/:course_id/status - Move an enrollment
//! - DELETE /enrollments/:student_id/:course_id - Unenroll (admin)
//! - PUT /assignments/:instructor_id/:course_id/status - Move an assignment (admin)
//! - POST /events/:event_id/read - Mark an event read for the caller
//! - GET /events/unread-count - Count the caller's unread notifications

use crate::handlers::{
    mark_read_handler, remove_enrollment_handler, set_active_handler, set_approval_handler,
    set_assignment_status_handler, set_enrollment_status_handler, unread_count_handler,
};
use crate::middleware::{admin_guard, require_identity};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Extension, Router,
};
use campus_lifecycle::{AckStore, LifecycleEngine};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Shared state for lifecycle routes.
#[derive(Clone)]
pub struct LifecycleState {
    /// The lifecycle engine.
    pub engine: Arc<LifecycleEngine>,
    /// The read-acknowledgment store.
    pub acks: Arc<AckStore>,
}

impl LifecycleState {
    /// Create lifecycle state with default store timeouts.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            engine: Arc::new(LifecycleEngine::new(pool.clone())),
            acks: Arc::new(AckStore::new(pool)),
        }
    }

    /// Create lifecycle state with an explicit store timeout.
    #[must_use]
    pub fn with_store_timeout(pool: PgPool, store_timeout: Duration) -> Self {
        Self {
            engine: Arc::new(LifecycleEngine::with_store_timeout(
                pool.clone(),
                store_timeout,
            )),
            acks: Arc::new(AckStore::with_store_timeout(pool, store_timeout)),
        }
    }
}

/// Create the lifecycle router with all endpoints.
///
/// Admin-only routes sit behind [`admin_guard`]; everything requires a
/// resolved identity. The engine re-checks authorization on each operation,
/// so the guards are a first gate, not the only one.
pub fn lifecycle_router(state: LifecycleState) -> Router {
    let admin_routes = Router::new()
        .route("/accounts/:id/approval", put(set_approval_handler))
        .route("/accounts/:id/active", put(set_active_handler))
        .route(
            "/enrollments/:student_id/:course_id",
            delete(remove_enrollment_handler),
        )
        .route(
            "/assignments/:instructor_id/:course_id/status",
            put(set_assignment_status_handler),
        )
        .layer(middleware::from_fn(admin_guard));

    // Enrollment transitions are reachable by non-admins (self-cancel), so
    // they take the identity gate only; the engine decides ownership.
    let user_routes = Router::new()
        .route(
            "/enrollments/:student_id/:course_id/status",
            put(set_enrollment_status_handler),
        )
        .route("/events/:event_id/read", post(mark_read_handler))
        .route("/events/unread-count", get(unread_count_handler));

    Router::new()
        .merge(admin_routes)
        .merge(user_routes)
        .layer(middleware::from_fn(require_identity))
        .layer(Extension(state.engine))
        .layer(Extension(state.acks))
}
