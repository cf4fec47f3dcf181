//! Account approval and activation endpoints.
//!
//! PUT /accounts/:id/approval - Grant or revoke approval.
//! PUT /accounts/:id/active - Switch an account on or off.

use crate::error::ApiLifecycleError;
use crate::models::{AccountResponse, SetActiveRequest, SetApprovalRequest};
use axum::{extract::Path, Extension, Json};
use campus_core::AccountId;
use campus_lifecycle::{IdentityContext, LifecycleEngine};
use std::sync::Arc;

/// Grants or revokes approval for a non-admin account.
///
/// Revoking approval also deactivates the account: approval is upstream of
/// activity.
#[utoipa::path(
    put,
    path = "/accounts/{id}/approval",
    params(
        ("id" = String, Path, description = "Account ID"),
    ),
    request_body = SetApprovalRequest,
    responses(
        (status = 200, description = "Approval state applied", body = AccountResponse),
        (status = 400, description = "Invalid account ID"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No non-admin account with this ID"),
    ),
    tag = "Accounts"
)]
pub async fn set_approval_handler(
    Extension(ctx): Extension<IdentityContext>,
    Extension(engine): Extension<Arc<LifecycleEngine>>,
    Path(id): Path<String>,
    Json(request): Json<SetApprovalRequest>,
) -> Result<Json<AccountResponse>, ApiLifecycleError> {
    let account_id: AccountId = id
        .parse()
        .map_err(|_| ApiLifecycleError::Validation("Invalid account ID format".to_string()))?;

    tracing::info!(
        admin_id = %ctx.id,
        account_id = %account_id,
        approve = request.approve,
        "Setting account approval"
    );

    let outcome = engine.set_approval(&ctx, account_id, request.approve).await?;
    Ok(Json(outcome.into()))
}

/// Switches a non-admin account on or off.
///
/// Activation requires the account to have been approved.
#[utoipa::path(
    put,
    path = "/accounts/{id}/active",
    params(
        ("id" = String, Path, description = "Account ID"),
    ),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Activity state applied", body = AccountResponse),
        (status = 400, description = "Invalid account ID"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No non-admin account with this ID"),
        (status = 412, description = "Account is not approved"),
    ),
    tag = "Accounts"
)]
pub async fn set_active_handler(
    Extension(ctx): Extension<IdentityContext>,
    Extension(engine): Extension<Arc<LifecycleEngine>>,
    Path(id): Path<String>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<AccountResponse>, ApiLifecycleError> {
    let account_id: AccountId = id
        .parse()
        .map_err(|_| ApiLifecycleError::Validation("Invalid account ID format".to_string()))?;

    tracing::info!(
        admin_id = %ctx.id,
        account_id = %account_id,
        active = request.active,
        "Setting account activity"
    );

    let outcome = engine.set_active(&ctx, account_id, request.active).await?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    // Handler tests require a database; see tests/route_tests.rs.
}
