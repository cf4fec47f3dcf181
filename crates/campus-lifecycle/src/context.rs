//! Caller identity context.
//!
//! Every engine operation takes the caller's resolved identity as an
//! explicit parameter. Resolution (session lookup, token verification) is
//! the identity provider's job; the core never reaches for ambient state.

use campus_core::AccountId;
use campus_db::{Account, AccountRole};
use serde::{Deserialize, Serialize};

/// The resolved identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    /// The caller's account ID.
    pub id: AccountId,

    /// The caller's platform role.
    pub role: AccountRole,

    /// Whether the caller's account has been approved.
    pub is_approved: bool,

    /// Whether the caller's account is currently active.
    pub active: bool,
}

impl IdentityContext {
    /// Build an identity context from its parts.
    #[must_use]
    pub fn new(id: AccountId, role: AccountRole, is_approved: bool, active: bool) -> Self {
        Self {
            id,
            role,
            is_approved,
            active,
        }
    }

    /// Build an identity context from an account row.
    #[must_use]
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.account_id(),
            role: account.role,
            is_approved: account.is_approved,
            active: account.active,
        }
    }

    /// Whether the caller holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        let ctx = IdentityContext::new(AccountId::new(), AccountRole::Admin, true, true);
        assert!(ctx.is_admin());

        let ctx = IdentityContext::new(AccountId::new(), AccountRole::Student, true, true);
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_serde_roundtrip() {
        let ctx = IdentityContext::new(AccountId::new(), AccountRole::Instructor, true, false);
        let json = serde_json::to_string(&ctx).unwrap();
        let back: IdentityContext = serde_json::from_str(&json).unwrap();
        assert_eq!(ctx, back);
    }
}
