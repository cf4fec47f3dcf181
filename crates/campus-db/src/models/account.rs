//! Account entity model.
//!
//! Represents one platform identity with a role and approval/activity state.

use campus_core::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

/// Platform role attached to an account.
///
/// Never mutated by the lifecycle core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Platform administrator. Immutable with respect to lifecycle state.
    Admin,
    /// Teaches courses; must be approved before holding an active assignment.
    Instructor,
    /// Enrolls in courses.
    Student,
}

/// Coarse account status derived from approval and activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Registered, awaiting admin approval or activation.
    #[default]
    Pending,
    /// Approved and switched on.
    Active,
    /// Switched off by an admin.
    Inactive,
}

impl AccountStatus {
    /// Lowercase wire name, matching the Postgres enum label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account in the system.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account.
    pub id: Uuid,

    /// Platform role. Not writable through this service.
    pub role: AccountRole,

    /// Whether an admin has approved this account.
    pub is_approved: bool,

    /// Whether the account is switched on. Implies `is_approved` for
    /// non-admin accounts.
    pub active: bool,

    /// Coarse status shown to admins: pending, active, or inactive.
    pub account_status: AccountStatus,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data needed to create a new account row.
///
/// Registration is handled outside the lifecycle core; this exists for the
/// registration path and for test seeding. New accounts start pending,
/// unapproved, and inactive.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub role: AccountRole,
}

impl Account {
    /// Get the account ID as a typed `AccountId`.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        AccountId::from_uuid(self.id)
    }

    /// Find an account by ID.
    pub async fn find_by_id(pool: &sqlx::PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM accounts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a non-admin account by ID, locking the row for the duration of
    /// the transaction.
    ///
    /// Admin accounts are deliberately invisible here: no lifecycle
    /// transition may target them.
    pub async fn find_non_admin_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM accounts
            WHERE id = $1 AND role <> 'admin'
            FOR UPDATE
            ",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Find an account by ID inside an open transaction (any role, no lock).
    pub async fn find_by_id_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM accounts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Create a new account row in the initial (pending) state.
    pub async fn create(pool: &sqlx::PgPool, input: &CreateAccount) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO accounts (role)
            VALUES ($1)
            RETURNING *
            ",
        )
        .bind(input.role)
        .fetch_one(pool)
        .await
    }

    /// Write the approval/activity fields of an account inside an open
    /// transaction.
    ///
    /// The caller (the lifecycle engine) is responsible for only writing
    /// combinations that satisfy the account invariants; the table CHECK
    /// constraints reject anything else.
    pub async fn update_state_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        is_approved: bool,
        active: bool,
        account_status: AccountStatus,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE accounts
            SET
                is_approved = $2,
                active = $3,
                account_status = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(is_approved)
        .bind(active)
        .bind(account_status)
        .fetch_one(&mut **tx)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str_matches_postgres_labels() {
        assert_eq!(AccountStatus::Pending.as_str(), "pending");
        assert_eq!(AccountStatus::Active.as_str(), "active");
        assert_eq!(AccountStatus::Inactive.as_str(), "inactive");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&AccountRole::Instructor).unwrap();
        assert_eq!(json, "\"instructor\"");
    }

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(AccountStatus::default(), AccountStatus::Pending);
    }
}
