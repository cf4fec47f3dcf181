//! Status model: the legal states and transitions for every entity.
//!
//! Pure data and validation helpers, no I/O. The engine consults these
//! tables for every mutation so each call site enforces identical rules;
//! nothing else in the system decides whether a transition is legal.

use campus_db::{AccountStatus, AssignmentStatus, EnrollmentStatus};

/// Outcome of checking a requested transition against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The transition is legal and changes state.
    Apply,
    /// The target state already holds; succeed without mutation.
    NoOp,
    /// The state machine rejects the move.
    Rejected,
}

/// The lifecycle-relevant fields of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountState {
    pub is_approved: bool,
    pub active: bool,
    pub status: AccountStatus,
}

/// A requested change to an account's lifecycle fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    /// Grant or revoke approval.
    SetApproval(bool),
    /// Switch the account on or off.
    SetActive(bool),
}

/// Result of applying an [`AccountAction`] to an [`AccountState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountDecision {
    /// Write these field values.
    Apply(AccountState),
    /// The requested state already holds and all cross-field invariants are
    /// satisfied.
    NoOp,
    /// A required upstream state is absent.
    Rejected(&'static str),
}

/// Decide the result of applying `action` to a non-admin account in `state`.
///
/// Admin accounts never reach this table: the engine refuses to resolve them
/// as transition targets.
///
/// Approval is upstream of activity: revoking approval always forces the
/// account off and back to pending, and activation requires approval. A
/// no-op approval change still re-checks the cross-field invariant, so a
/// revoke request against an unapproved-but-active row repairs it rather
/// than succeeding silently.
#[must_use]
pub fn account_transition(state: AccountState, action: AccountAction) -> AccountDecision {
    match action {
        AccountAction::SetApproval(true) => {
            if state.is_approved {
                AccountDecision::NoOp
            } else {
                AccountDecision::Apply(AccountState {
                    is_approved: true,
                    ..state
                })
            }
        }
        AccountAction::SetApproval(false) => {
            let invariant_holds =
                !state.is_approved && !state.active && state.status == AccountStatus::Pending;
            if invariant_holds {
                AccountDecision::NoOp
            } else {
                AccountDecision::Apply(AccountState {
                    is_approved: false,
                    active: false,
                    status: AccountStatus::Pending,
                })
            }
        }
        AccountAction::SetActive(true) => {
            if state.active {
                AccountDecision::NoOp
            } else if !state.is_approved {
                AccountDecision::Rejected("account must be approved before activation")
            } else {
                AccountDecision::Apply(AccountState {
                    active: true,
                    status: AccountStatus::Active,
                    ..state
                })
            }
        }
        AccountAction::SetActive(false) => {
            if state.active {
                AccountDecision::Apply(AccountState {
                    active: false,
                    status: AccountStatus::Inactive,
                    ..state
                })
            } else {
                AccountDecision::NoOp
            }
        }
    }
}

/// Transition table for enrollments.
///
/// `pending → active`, `pending → cancelled`, `active → cancelled`;
/// cancelled is terminal.
#[must_use]
pub fn enrollment_transition(current: EnrollmentStatus, target: EnrollmentStatus) -> Transition {
    use EnrollmentStatus::{Active, Cancelled, Pending};

    if current == target {
        return Transition::NoOp;
    }
    match (current, target) {
        (Pending, Active) | (Pending, Cancelled) | (Active, Cancelled) => Transition::Apply,
        _ => Transition::Rejected,
    }
}

/// Transition table for instructor assignments.
///
/// `pending → active`, `pending → revoked`, `active → revoked`;
/// revoked is terminal.
#[must_use]
pub fn assignment_transition(current: AssignmentStatus, target: AssignmentStatus) -> Transition {
    use AssignmentStatus::{Active, Pending, Revoked};

    if current == target {
        return Transition::NoOp;
    }
    match (current, target) {
        (Pending, Active) | (Pending, Revoked) | (Active, Revoked) => Transition::Apply,
        _ => Transition::Rejected,
    }
}
