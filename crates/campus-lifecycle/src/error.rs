//! Lifecycle error taxonomy.
//!
//! Every engine and ack-store operation returns one of these. A requested
//! state that already holds is not an error; it surfaces as
//! [`crate::engine::Outcome::Unchanged`].

use thiserror::Error;

/// Errors returned by lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Caller lacks the required role or is not the resource owner.
    #[error("caller is not permitted to perform this operation")]
    Forbidden,

    /// Target entity does not exist or does not match the expected
    /// role/relationship.
    #[error("{resource} not found")]
    NotFound {
        /// The kind of entity that was looked up.
        resource: &'static str,
    },

    /// A required upstream state (e.g. approval) is absent.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// The requested transition is incompatible with the row's current
    /// state, either because a concurrent caller got there first or because
    /// the state machine rejects the move.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store did not answer within the configured timeout. No partial
    /// write is visible.
    #[error("storage unavailable")]
    Unavailable,

    /// Unexpected storage failure. Logged for operators, never a policy
    /// decision.
    #[error("internal storage error")]
    Internal(#[source] sqlx::Error),
}

impl LifecycleError {
    /// Classify a raw storage error.
    ///
    /// Pool exhaustion and timeouts surface as `Unavailable`; anything else
    /// (including constraint violations, which indicate a bug in the engine)
    /// is `Internal` and logged.
    pub fn from_store(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => LifecycleError::Unavailable,
            other => {
                tracing::error!(error = %other, "storage operation failed");
                LifecycleError::Internal(other)
            }
        }
    }

    /// Whether the underlying storage error was a foreign-key violation.
    #[must_use]
    pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
        err.as_database_error()
            .is_some_and(|db| matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation))
    }
}

/// Type alias for Results using [`LifecycleError`].
pub type Result<T> = std::result::Result<T, LifecycleError>;
