//! Database access layer for the campus platform.
//!
//! Provides the connection pool wrapper, embedded migrations, and one model
//! per entity. Models expose async query methods over `sqlx` and never embed
//! policy: who may change what, and when, is decided by `campus-lifecycle`.
//!
//! # Modules
//!
//! - [`pool`] - `DbPool` connection pool wrapper
//! - [`error`] - `DbError` unified error type
//! - [`migrations`] - embedded SQL migration runner
//! - [`models`] - entity models (Account, Enrollment, InstructorAssignment,
//!   ReadMark, Notification)

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::account::{Account, AccountRole, AccountStatus, CreateAccount};
pub use models::enrollment::{CreateEnrollment, Enrollment, EnrollmentStatus};
pub use models::instructor_assignment::{
    AssignmentStatus, CreateInstructorAssignment, InstructorAssignment,
};
pub use models::notification::{CreateNotification, Notification};
pub use models::read_mark::ReadMark;
pub use pool::DbPool;
