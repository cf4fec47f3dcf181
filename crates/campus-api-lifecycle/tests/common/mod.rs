//! Shared helpers for database-backed route tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use campus_api_lifecycle::{lifecycle_router, LifecycleState};
use campus_core::AccountId;
use campus_db::{Account, AccountRole, CreateAccount, DbPool};
use campus_lifecycle::IdentityContext;
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

/// Build the router under test.
pub fn test_router(pool: PgPool) -> Router {
    lifecycle_router(LifecycleState::new(pool))
}

/// An admin identity context.
pub fn admin_ctx() -> IdentityContext {
    IdentityContext::new(AccountId::new(), AccountRole::Admin, true, true)
}

/// Create a fresh pending account with the given role.
pub async fn create_account(pool: &PgPool, role: AccountRole) -> Account {
    Account::create(pool, &CreateAccount { role })
        .await
        .expect("create account")
}

/// Build a request carrying an identity context and an optional JSON body.
pub fn authed_request(
    method: &str,
    uri: &str,
    ctx: Option<IdentityContext>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let mut request = builder.body(body).unwrap();
    if let Some(ctx) = ctx {
        request.extensions_mut().insert(ctx);
    }
    request
}

/// Read a JSON response body.
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response JSON")
}
