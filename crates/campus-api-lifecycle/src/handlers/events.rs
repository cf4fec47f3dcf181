//! Read-acknowledgment endpoints.
//!
//! POST /events/:event_id/read - Mark an event read for the caller.
//! GET /events/unread-count - Count the caller's unread notifications.

use crate::error::ApiLifecycleError;
use crate::models::{ReadAckResponse, UnreadCountResponse};
use axum::{extract::Path, Extension, Json};
use campus_core::EventId;
use campus_lifecycle::{AckStore, IdentityContext};
use std::sync::Arc;

/// Marks an event as read for the authenticated caller.
///
/// Idempotent: duplicate submissions (including concurrent retries) succeed
/// and leave exactly one mark.
#[utoipa::path(
    post,
    path = "/events/{event_id}/read",
    params(
        ("event_id" = String, Path, description = "Notification/message ID"),
    ),
    responses(
        (status = 200, description = "Mark on record (newly_marked=false for duplicates)", body = ReadAckResponse),
        (status = 400, description = "Invalid event ID"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such event"),
    ),
    tag = "Events"
)]
pub async fn mark_read_handler(
    Extension(ctx): Extension<IdentityContext>,
    Extension(acks): Extension<Arc<AckStore>>,
    Path(event_id): Path<String>,
) -> Result<Json<ReadAckResponse>, ApiLifecycleError> {
    let event_id: EventId = event_id
        .parse()
        .map_err(|_| ApiLifecycleError::Validation("Invalid event ID format".to_string()))?;

    let ack = acks.mark_read(ctx.id, event_id).await?;
    Ok(Json(ack.into()))
}

/// Counts notifications the caller has not acknowledged.
#[utoipa::path(
    get,
    path = "/events/unread-count",
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "Events"
)]
pub async fn unread_count_handler(
    Extension(ctx): Extension<IdentityContext>,
    Extension(acks): Extension<Arc<AckStore>>,
) -> Result<Json<UnreadCountResponse>, ApiLifecycleError> {
    let unread = acks.unread_count(ctx.id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}
