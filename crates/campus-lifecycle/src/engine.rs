//! Lifecycle engine.
//!
//! Validates and applies state transitions for accounts, enrollments, and
//! instructor assignments. Authorization preconditions and cross-entity
//! consequences live here and nowhere else.
//!
//! Every mutating operation is a single transaction: read the current row
//! under a lock, consult the status model, write, commit. Concurrent calls
//! on the same key serialize at the row lock; the loser observes either an
//! idempotent no-op (same requested end state) or a conflict (different end
//! state). The engine holds no in-process locks and no state between calls.

use crate::context::IdentityContext;
use crate::error::{LifecycleError, Result};
use crate::status::{
    self, AccountAction, AccountDecision, AccountState, Transition,
};
use campus_core::{AccountId, CourseId};
use campus_db::{
    Account, AssignmentStatus, Enrollment, EnrollmentStatus, InstructorAssignment,
};
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;

/// Default upper bound for any single store transaction.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of a successful lifecycle operation.
///
/// A requested state that already holds is success, not an error, but
/// callers (and result-code mapping) still need to tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The transition was applied and the entity changed.
    Applied(T),
    /// The requested state already held; nothing was written.
    Unchanged(T),
}

impl<T> Outcome<T> {
    /// The entity in its current (possibly just-written) state.
    pub fn entity(&self) -> &T {
        match self {
            Outcome::Applied(entity) | Outcome::Unchanged(entity) => entity,
        }
    }

    /// Consume the outcome and return the entity.
    pub fn into_entity(self) -> T {
        match self {
            Outcome::Applied(entity) | Outcome::Unchanged(entity) => entity,
        }
    }

    /// Whether the operation wrote anything.
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// The lifecycle engine.
///
/// Stateless between calls; clone freely. All mutual exclusion is delegated
/// to the store's transaction isolation.
#[derive(Debug, Clone)]
pub struct LifecycleEngine {
    pool: PgPool,
    store_timeout: Duration,
}

impl LifecycleEngine {
    /// Create an engine with the default store timeout.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Create an engine with an explicit store timeout.
    #[must_use]
    pub fn with_store_timeout(pool: PgPool, store_timeout: Duration) -> Self {
        Self {
            pool,
            store_timeout,
        }
    }

    /// Access the underlying pool (useful for tests).
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Bound a store operation by the configured timeout.
    ///
    /// The transaction either committed before the deadline or it did not;
    /// an elapsed timeout surfaces `Unavailable` with no partial write
    /// visible either way.
    async fn bounded<T, F>(&self, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| LifecycleError::Unavailable)?
    }

    /// Require an active admin caller.
    fn require_admin(&self, ctx: &IdentityContext) -> Result<()> {
        if !ctx.is_admin() || !ctx.active {
            tracing::warn!(caller_id = %ctx.id, role = ?ctx.role, "admin operation denied");
            return Err(LifecycleError::Forbidden);
        }
        Ok(())
    }

    /// Grant or revoke approval for a non-admin account.
    ///
    /// Admin only. Revoking approval always revokes activity as well:
    /// approval is upstream of activity, so `approve=false` atomically
    /// forces `active=false` and resets the status to pending.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not an active admin
    /// - `NotFound` if the ID does not resolve to a non-admin account
    /// - `Unavailable` on store timeout
    pub async fn set_approval(
        &self,
        ctx: &IdentityContext,
        account_id: AccountId,
        approve: bool,
    ) -> Result<Outcome<Account>> {
        self.require_admin(ctx)?;

        self.bounded(async {
            let mut tx = self.pool.begin().await.map_err(LifecycleError::from_store)?;

            let account = Account::find_non_admin_for_update(&mut tx, *account_id.as_uuid())
                .await
                .map_err(LifecycleError::from_store)?
                .ok_or(LifecycleError::NotFound {
                    resource: "account",
                })?;

            match status::account_transition(
                account_state(&account),
                AccountAction::SetApproval(approve),
            ) {
                AccountDecision::NoOp => Ok(Outcome::Unchanged(account)),
                AccountDecision::Rejected(reason) => {
                    Err(LifecycleError::PreconditionFailed(reason.to_string()))
                }
                AccountDecision::Apply(next) => {
                    let updated = Account::update_state_in_tx(
                        &mut tx,
                        account.id,
                        next.is_approved,
                        next.active,
                        next.status,
                    )
                    .await
                    .map_err(LifecycleError::from_store)?;
                    tx.commit().await.map_err(LifecycleError::from_store)?;

                    tracing::info!(
                        admin_id = %ctx.id,
                        account_id = %account_id,
                        approved = approve,
                        "account approval changed"
                    );
                    Ok(Outcome::Applied(updated))
                }
            }
        })
        .await
    }

    /// Switch a non-admin account on or off.
    ///
    /// Admin only. Activation requires prior approval; deactivation of an
    /// already-inactive account is an idempotent no-op.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not an active admin
    /// - `NotFound` if the ID does not resolve to a non-admin account
    /// - `PreconditionFailed` if activating an unapproved account
    /// - `Unavailable` on store timeout
    pub async fn set_active(
        &self,
        ctx: &IdentityContext,
        account_id: AccountId,
        active: bool,
    ) -> Result<Outcome<Account>> {
        self.require_admin(ctx)?;

        self.bounded(async {
            let mut tx = self.pool.begin().await.map_err(LifecycleError::from_store)?;

            let account = Account::find_non_admin_for_update(&mut tx, *account_id.as_uuid())
                .await
                .map_err(LifecycleError::from_store)?
                .ok_or(LifecycleError::NotFound {
                    resource: "account",
                })?;

            match status::account_transition(
                account_state(&account),
                AccountAction::SetActive(active),
            ) {
                AccountDecision::NoOp => Ok(Outcome::Unchanged(account)),
                AccountDecision::Rejected(reason) => {
                    tracing::warn!(
                        admin_id = %ctx.id,
                        account_id = %account_id,
                        "activation rejected: {reason}"
                    );
                    Err(LifecycleError::PreconditionFailed(reason.to_string()))
                }
                AccountDecision::Apply(next) => {
                    let updated = Account::update_state_in_tx(
                        &mut tx,
                        account.id,
                        next.is_approved,
                        next.active,
                        next.status,
                    )
                    .await
                    .map_err(LifecycleError::from_store)?;
                    tx.commit().await.map_err(LifecycleError::from_store)?;

                    tracing::info!(
                        admin_id = %ctx.id,
                        account_id = %account_id,
                        active,
                        "account activity changed"
                    );
                    Ok(Outcome::Applied(updated))
                }
            }
        })
        .await
    }

    /// Move an enrollment to a new status.
    ///
    /// Admins may request any legal transition; the enrolled student may
    /// cancel their own enrollment and nothing else. `expected` is the
    /// status the caller observed before requesting the change: if the row
    /// has since moved, the call returns an idempotent no-op when the row
    /// already sits at `target` and `Conflict` otherwise.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is neither admin nor the self-cancelling
    ///   student
    /// - `NotFound` if no enrollment exists for the pair
    /// - `Conflict` if the row moved past `expected`, or the state machine
    ///   rejects the move (cancelled is terminal)
    /// - `Unavailable` on store timeout
    pub async fn set_enrollment_status(
        &self,
        ctx: &IdentityContext,
        student_id: AccountId,
        course_id: CourseId,
        expected: EnrollmentStatus,
        target: EnrollmentStatus,
    ) -> Result<Outcome<Enrollment>> {
        let self_cancel = ctx.id == student_id && target == EnrollmentStatus::Cancelled;
        if !ctx.active || !(ctx.is_admin() || self_cancel) {
            tracing::warn!(
                caller_id = %ctx.id,
                student_id = %student_id,
                ?target,
                "enrollment transition denied"
            );
            return Err(LifecycleError::Forbidden);
        }

        self.bounded(async {
            let mut tx = self.pool.begin().await.map_err(LifecycleError::from_store)?;

            let enrollment = Enrollment::find_by_pair_for_update(
                &mut tx,
                *student_id.as_uuid(),
                *course_id.as_uuid(),
            )
            .await
            .map_err(LifecycleError::from_store)?
            .ok_or(LifecycleError::NotFound {
                resource: "enrollment",
            })?;

            if enrollment.status == target {
                return Ok(Outcome::Unchanged(enrollment));
            }
            if enrollment.status != expected {
                return Err(LifecycleError::Conflict(format!(
                    "enrollment moved from {expected} to {} before this request",
                    enrollment.status
                )));
            }

            match status::enrollment_transition(enrollment.status, target) {
                Transition::NoOp => Ok(Outcome::Unchanged(enrollment)),
                Transition::Rejected => Err(LifecycleError::Conflict(format!(
                    "enrollment cannot move from {} to {target}",
                    enrollment.status
                ))),
                Transition::Apply => {
                    let updated = Enrollment::update_status_in_tx(&mut tx, enrollment.id, target)
                        .await
                        .map_err(LifecycleError::from_store)?;
                    tx.commit().await.map_err(LifecycleError::from_store)?;

                    tracing::info!(
                        caller_id = %ctx.id,
                        student_id = %student_id,
                        course_id = %course_id,
                        from = %enrollment.status,
                        to = %target,
                        "enrollment status changed"
                    );
                    Ok(Outcome::Applied(updated))
                }
            }
        })
        .await
    }

    /// Hard-delete an enrollment.
    ///
    /// Admin only. This is the unenroll operation: terminal, irreversible,
    /// and distinct from cancellation (the row is removed, history and all).
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not an active admin
    /// - `NotFound` if no enrollment exists for the pair
    /// - `Unavailable` on store timeout
    pub async fn remove_enrollment(
        &self,
        ctx: &IdentityContext,
        student_id: AccountId,
        course_id: CourseId,
    ) -> Result<()> {
        self.require_admin(ctx)?;

        self.bounded(async {
            let removed = Enrollment::delete_by_pair(
                &self.pool,
                *student_id.as_uuid(),
                *course_id.as_uuid(),
            )
            .await
            .map_err(LifecycleError::from_store)?;

            if removed == 0 {
                return Err(LifecycleError::NotFound {
                    resource: "enrollment",
                });
            }

            tracing::info!(
                admin_id = %ctx.id,
                student_id = %student_id,
                course_id = %course_id,
                rows = removed,
                "enrollment removed"
            );
            Ok(())
        })
        .await
    }

    /// Move an instructor assignment to a new status.
    ///
    /// Admin only. Activation additionally requires the target account to
    /// be an approved instructor; deactivating an instructor account later
    /// deliberately does not cascade back to assignments.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not an active admin
    /// - `NotFound` if no assignment exists for the pair
    /// - `PreconditionFailed` if activating and the target account is not an
    ///   approved instructor
    /// - `Conflict` if the state machine rejects the move (revoked is
    ///   terminal)
    /// - `Unavailable` on store timeout
    pub async fn set_assignment_status(
        &self,
        ctx: &IdentityContext,
        instructor_id: AccountId,
        course_id: CourseId,
        target: AssignmentStatus,
    ) -> Result<Outcome<InstructorAssignment>> {
        self.require_admin(ctx)?;

        self.bounded(async {
            let mut tx = self.pool.begin().await.map_err(LifecycleError::from_store)?;

            let assignment = InstructorAssignment::find_by_pair_for_update(
                &mut tx,
                *instructor_id.as_uuid(),
                *course_id.as_uuid(),
            )
            .await
            .map_err(LifecycleError::from_store)?
            .ok_or(LifecycleError::NotFound {
                resource: "assignment",
            })?;

            match status::assignment_transition(assignment.status, target) {
                Transition::NoOp => Ok(Outcome::Unchanged(assignment)),
                Transition::Rejected => Err(LifecycleError::Conflict(format!(
                    "assignment cannot move from {} to {target}",
                    assignment.status
                ))),
                Transition::Apply => {
                    if target == AssignmentStatus::Active {
                        let account =
                            Account::find_by_id_in_tx(&mut tx, *instructor_id.as_uuid())
                                .await
                                .map_err(LifecycleError::from_store)?;
                        let approved_instructor = account.as_ref().is_some_and(|a| {
                            a.role == campus_db::AccountRole::Instructor && a.is_approved
                        });
                        if !approved_instructor {
                            return Err(LifecycleError::PreconditionFailed(
                                "assignment activation requires an approved instructor account"
                                    .to_string(),
                            ));
                        }
                    }

                    let updated =
                        InstructorAssignment::update_status_in_tx(&mut tx, assignment.id, target)
                            .await
                            .map_err(LifecycleError::from_store)?;
                    tx.commit().await.map_err(LifecycleError::from_store)?;

                    tracing::info!(
                        admin_id = %ctx.id,
                        instructor_id = %instructor_id,
                        course_id = %course_id,
                        from = %assignment.status,
                        to = %target,
                        "assignment status changed"
                    );
                    Ok(Outcome::Applied(updated))
                }
            }
        })
        .await
    }
}

/// Project the lifecycle-relevant fields out of an account row.
fn account_state(account: &Account) -> AccountState {
    AccountState {
        is_approved: account.is_approved,
        active: account.active,
        status: account.account_status,
    }
}
