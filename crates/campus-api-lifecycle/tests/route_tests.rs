//! Integration tests for the lifecycle routes.
//!
//! These drive the router end-to-end: guard middleware, handlers, engine,
//! and database.
//!
//! Run with: `cargo test -p campus-api-lifecycle -- --ignored`

mod common;

use axum::http::StatusCode;
use campus_core::CourseId;
use campus_db::{AccountRole, CreateEnrollment, CreateNotification, Enrollment, Notification};
use campus_lifecycle::IdentityContext;
use common::*;
use serde_json::json;
use tower::util::ServiceExt;

#[tokio::test]
#[ignore = "Requires database - run locally with DATABASE_URL"]
async fn test_approval_route_applies_and_reports_change() {
    let pool = create_test_pool().await;
    let student = create_account(&pool, AccountRole::Student).await;

    let request = authed_request(
        "PUT",
        &format!("/accounts/{}/approval", student.id),
        Some(admin_ctx()),
        Some(json!({"approve": true})),
    );
    let response = test_router(pool.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["is_approved"], json!(true));
    assert_eq!(body["changed"], json!(true));

    // Re-applying is a 200 with changed=false
    let request = authed_request(
        "PUT",
        &format!("/accounts/{}/approval", student.id),
        Some(admin_ctx()),
        Some(json!({"approve": true})),
    );
    let response = test_router(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["changed"], json!(false));
}

#[tokio::test]
#[ignore = "Requires database - run locally with DATABASE_URL"]
async fn test_activation_route_requires_approval() {
    let pool = create_test_pool().await;
    let student = create_account(&pool, AccountRole::Student).await;

    let request = authed_request(
        "PUT",
        &format!("/accounts/{}/active", student.id),
        Some(admin_ctx()),
        Some(json!({"active": true})),
    );
    let response = test_router(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

    let body = response_json(response).await;
    assert_eq!(body["error"], json!("precondition_failed"));
}

#[tokio::test]
#[ignore = "Requires database - run locally with DATABASE_URL"]
async fn test_admin_routes_reject_students_and_anonymous() {
    let pool = create_test_pool().await;
    let student = create_account(&pool, AccountRole::Student).await;
    let uri = format!("/accounts/{}/approval", student.id);

    let student_ctx = IdentityContext::new(
        student.account_id(),
        AccountRole::Student,
        true,
        true,
    );
    let request = authed_request("PUT", &uri, Some(student_ctx), Some(json!({"approve": true})));
    let response = test_router(pool.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = authed_request("PUT", &uri, None, Some(json!({"approve": true})));
    let response = test_router(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires database - run locally with DATABASE_URL"]
async fn test_invalid_account_id_is_bad_request() {
    let pool = create_test_pool().await;

    let request = authed_request(
        "PUT",
        "/accounts/not-a-uuid/approval",
        Some(admin_ctx()),
        Some(json!({"approve": true})),
    );
    let response = test_router(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires database - run locally with DATABASE_URL"]
async fn test_student_cancels_own_enrollment_via_route() {
    let pool = create_test_pool().await;
    let router = test_router(pool.clone());
    let student = create_account(&pool, AccountRole::Student).await;
    let course_id = CourseId::new();
    Enrollment::create(
        &pool,
        &CreateEnrollment {
            student_id: student.id,
            course_id: *course_id.as_uuid(),
            status: campus_db::EnrollmentStatus::Active,
        },
    )
    .await
    .unwrap();

    // The student's account is pending, but identity resolution says who
    // they are; mark them active so the engine lets them act.
    let ctx = IdentityContext::new(student.account_id(), AccountRole::Student, true, true);
    let request = authed_request(
        "PUT",
        &format!("/enrollments/{}/{}/status", student.id, course_id),
        Some(ctx),
        Some(json!({"expected": "active", "status": "cancelled"})),
    );
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], json!("cancelled"));
    assert_eq!(body["changed"], json!(true));
}

#[tokio::test]
#[ignore = "Requires database - run locally with DATABASE_URL"]
async fn test_remove_enrollment_route() {
    let pool = create_test_pool().await;
    let student = create_account(&pool, AccountRole::Student).await;
    let course_id = CourseId::new();
    Enrollment::create(
        &pool,
        &CreateEnrollment {
            student_id: student.id,
            course_id: *course_id.as_uuid(),
            status: campus_db::EnrollmentStatus::Pending,
        },
    )
    .await
    .unwrap();
    let uri = format!("/enrollments/{}/{}", student.id, course_id);

    let request = authed_request("DELETE", &uri, Some(admin_ctx()), None);
    let response = test_router(pool.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone now
    let request = authed_request("DELETE", &uri, Some(admin_ctx()), None);
    let response = test_router(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires database - run locally with DATABASE_URL"]
async fn test_mark_read_route_is_idempotent() {
    let pool = create_test_pool().await;
    let student = create_account(&pool, AccountRole::Student).await;
    let notification = Notification::create(
        &pool,
        &CreateNotification {
            title: "welcome".to_string(),
            body: "".to_string(),
        },
    )
    .await
    .unwrap();
    let ctx = IdentityContext::new(student.account_id(), AccountRole::Student, true, true);
    let uri = format!("/events/{}/read", notification.id);

    let request = authed_request("POST", &uri, Some(ctx.clone()), None);
    let response = test_router(pool.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["newly_marked"], json!(true));

    let request = authed_request("POST", &uri, Some(ctx), None);
    let response = test_router(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["newly_marked"], json!(false));
}

#[tokio::test]
#[ignore = "Requires database - run locally with DATABASE_URL"]
async fn test_mark_read_unknown_event_is_not_found() {
    let pool = create_test_pool().await;
    let student = create_account(&pool, AccountRole::Student).await;
    let ctx = IdentityContext::new(student.account_id(), AccountRole::Student, true, true);

    let request = authed_request(
        "POST",
        &format!("/events/{}/read", uuid::Uuid::new_v4()),
        Some(ctx),
        None,
    );
    let response = test_router(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
