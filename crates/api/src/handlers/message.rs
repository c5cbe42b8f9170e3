//! Handlers for the `/messages` resource.

use axum::extract::{Path, State};
use axum::Json;
use leadflow_core::error::CoreError;
use leadflow_core::types::DbId;
use leadflow_core::validation::{validate_bulk_ids, validate_required, MAX_MESSAGE_LENGTH};
use leadflow_db::models::message::Message;
use leadflow_db::repositories::{LeadRepo, MessageRepo};
use serde::Deserialize;

use super::{parse_channel, required};
use crate::error::AppResult;
use crate::messaging::bulk::{self, BulkSendResult};
use crate::messaging::MessageDispatcher;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /messages/send`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub lead_id: Option<DbId>,
    pub channel: Option<String>,
    pub message: Option<String>,
}

/// Request body for `POST /messages/bulk-send`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSendRequest {
    #[serde(default)]
    pub lead_ids: Vec<DbId>,
    pub channel: Option<String>,
    pub message: Option<String>,
}

/// Request body for `POST /messages/bulk-send-personalized`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPersonalizedRequest {
    #[serde(default)]
    pub lead_ids: Vec<DbId>,
    pub channel: Option<String>,
    pub message_template: Option<String>,
}

fn message_body(value: Option<String>, field: &str) -> Result<String, CoreError> {
    let body = required(value, field)?;
    validate_required(field, &body, MAX_MESSAGE_LENGTH)?;
    Ok(body)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/messages/send
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<Json<ApiResponse<Message>>> {
    let lead_id = required(input.lead_id, "leadId")?;
    let channel = parse_channel(input.channel.as_deref())?;
    let body = message_body(input.message, "message")?;

    let message = MessageDispatcher::from_state(&state)
        .send(auth.user_id, lead_id, channel, &body)
        .await?;
    Ok(Json(
        ApiResponse::ok(message).with_message("Message sent successfully"),
    ))
}

/// POST /api/messages/bulk-send
///
/// Always 200 once the batch ran; `success` is true only if every lead
/// succeeded and `data` holds one result per requested id.
pub async fn bulk_send(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BulkSendRequest>,
) -> AppResult<Json<ApiResponse<Vec<BulkSendResult>>>> {
    validate_bulk_ids(&input.lead_ids)?;
    let channel = parse_channel(input.channel.as_deref())?;
    let body = message_body(input.message, "message")?;

    let dispatcher = MessageDispatcher::from_state(&state);
    let results = bulk::run_detached(bulk::send_to_each(
        dispatcher,
        auth.user_id,
        input.lead_ids,
        channel,
        body,
    ))
    .await?;

    let success = bulk::all_succeeded(&results);
    Ok(Json(
        ApiResponse::with_success(success, results).with_message("Bulk messages processed"),
    ))
}

/// POST /api/messages/bulk-send-personalized
pub async fn bulk_send_personalized(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BulkPersonalizedRequest>,
) -> AppResult<Json<ApiResponse<Vec<BulkSendResult>>>> {
    validate_bulk_ids(&input.lead_ids)?;
    let channel = parse_channel(input.channel.as_deref())?;
    let template = message_body(input.message_template, "messageTemplate")?;

    let dispatcher = MessageDispatcher::from_state(&state);
    let results = bulk::run_detached(bulk::send_personalized(
        dispatcher,
        auth.user_id,
        input.lead_ids,
        channel,
        template,
    ))
    .await?;

    let success = bulk::all_succeeded(&results);
    Ok(Json(
        ApiResponse::with_success(success, results)
            .with_message("Bulk personalized messages processed"),
    ))
}

/// GET /api/messages/history/{lead_id}
pub async fn message_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(lead_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<Message>>>> {
    LeadRepo::find_for_user(&state.pool, lead_id, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        })?;
    let messages = MessageRepo::list_for_lead(&state.pool, lead_id).await?;
    Ok(Json(ApiResponse::ok(messages)))
}
