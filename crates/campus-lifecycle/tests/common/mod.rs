//! Shared helpers for database-backed lifecycle tests.

#![allow(dead_code)]

use campus_core::{AccountId, CourseId};
use campus_db::{
    Account, AccountRole, CreateAccount, CreateEnrollment, CreateInstructorAssignment,
    CreateNotification, DbPool, Enrollment, EnrollmentStatus, InstructorAssignment, Notification,
};
use campus_lifecycle::{IdentityContext, LifecycleEngine};
use sqlx::PgPool;

/// Connect to the test database and ensure the schema is current.
pub async fn create_test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for db tests");
    let pool = DbPool::connect(&url).await.expect("connect test database");
    campus_db::run_migrations(&pool)
        .await
        .expect("run migrations");
    pool.into_inner()
}

/// An admin identity context.
///
/// The engine trusts the resolved context, so admin callers need no row.
pub fn admin_ctx() -> IdentityContext {
    IdentityContext::new(AccountId::new(), AccountRole::Admin, true, true)
}

/// Create a fresh pending student account.
pub async fn create_student(pool: &PgPool) -> Account {
    Account::create(
        pool,
        &CreateAccount {
            role: AccountRole::Student,
        },
    )
    .await
    .expect("create student account")
}

/// Create a fresh pending instructor account.
pub async fn create_instructor(pool: &PgPool) -> Account {
    Account::create(
        pool,
        &CreateAccount {
            role: AccountRole::Instructor,
        },
    )
    .await
    .expect("create instructor account")
}

/// Create a fresh admin account row (used as a transition target in tests).
pub async fn create_admin_account(pool: &PgPool) -> Account {
    Account::create(
        pool,
        &CreateAccount {
            role: AccountRole::Admin,
        },
    )
    .await
    .expect("create admin account")
}

/// Create a student account and bring it to approved + active.
pub async fn create_active_student(pool: &PgPool, engine: &LifecycleEngine) -> Account {
    let student = create_student(pool).await;
    let id = student.account_id();
    engine
        .set_approval(&admin_ctx(), id, true)
        .await
        .expect("approve student");
    engine
        .set_active(&admin_ctx(), id, true)
        .await
        .expect("activate student")
        .into_entity()
}

/// Create an enrollment row for a fresh course.
pub async fn create_enrollment(
    pool: &PgPool,
    student_id: AccountId,
    status: EnrollmentStatus,
) -> (Enrollment, CourseId) {
    let course_id = CourseId::new();
    let enrollment = Enrollment::create(
        pool,
        &CreateEnrollment {
            student_id: *student_id.as_uuid(),
            course_id: *course_id.as_uuid(),
            status,
        },
    )
    .await
    .expect("create enrollment");
    (enrollment, course_id)
}

/// Create a pending assignment row for a fresh course.
pub async fn create_assignment(
    pool: &PgPool,
    instructor_id: AccountId,
) -> (InstructorAssignment, CourseId) {
    let course_id = CourseId::new();
    let assignment = InstructorAssignment::create(
        pool,
        &CreateInstructorAssignment {
            instructor_id: *instructor_id.as_uuid(),
            course_id: *course_id.as_uuid(),
            role: None,
        },
    )
    .await
    .expect("create assignment");
    (assignment, course_id)
}

/// Publish a notification.
pub async fn create_notification(pool: &PgPool) -> Notification {
    Notification::create(
        pool,
        &CreateNotification {
            title: "course schedule updated".to_string(),
            body: "see the course page for details".to_string(),
        },
    )
    .await
    .expect("create notification")
}
