//! Handlers for the `/ai` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use leadflow_core::outreach::{DEFAULT_MODE, DEFAULT_TONE};
use leadflow_core::types::DbId;
use leadflow_core::validation::{
    normalize_optional, validate_bulk_ids, validate_required, MAX_MESSAGE_LENGTH,
};
use leadflow_db::models::ai_message::AiMessage;
use serde::Deserialize;

use super::{parse_channel, required};
use crate::error::AppResult;
use crate::messaging::bulk;
use crate::messaging::drafts::{BulkDraftResult, DraftStyle, SentDraft};
use crate::messaging::{DraftWriter, MessageDispatcher};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /ai/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub lead_id: Option<DbId>,
    pub channel: Option<String>,
    pub tone: Option<String>,
    pub mode: Option<String>,
}

/// Request body for `POST /ai/bulk-generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkGenerateRequest {
    #[serde(default)]
    pub lead_ids: Vec<DbId>,
    pub channel: Option<String>,
    pub tone: Option<String>,
    pub mode: Option<String>,
}

/// Request body for `PUT /ai/{id}/final-message`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalMessageRequest {
    pub final_message: Option<String>,
}

fn style_of(tone: Option<String>, mode: Option<String>) -> DraftStyle {
    DraftStyle {
        tone: normalize_optional(tone).unwrap_or_else(|| DEFAULT_TONE.to_string()),
        mode: normalize_optional(mode).unwrap_or_else(|| DEFAULT_MODE.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/ai/generate
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<GenerateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AiMessage>>)> {
    let lead_id = required(input.lead_id, "leadId")?;
    let channel = parse_channel(input.channel.as_deref())?;
    let style = style_of(input.tone, input.mode);

    let draft = DraftWriter::from_state(&state)
        .generate(auth.user_id, lead_id, channel, &style)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(draft).with_message("AI message generated successfully")),
    ))
}

/// POST /api/ai/bulk-generate
pub async fn bulk_generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BulkGenerateRequest>,
) -> AppResult<Json<ApiResponse<Vec<BulkDraftResult>>>> {
    validate_bulk_ids(&input.lead_ids)?;
    let channel = parse_channel(input.channel.as_deref())?;
    let style = style_of(input.tone, input.mode);

    let writer = DraftWriter::from_state(&state);
    let results = bulk::run_detached(writer.generate_each(
        auth.user_id,
        input.lead_ids,
        channel,
        style,
    ))
    .await?;

    let success = results.iter().all(|r| r.success);
    Ok(Json(
        ApiResponse::with_success(success, results).with_message("Bulk AI messages generated"),
    ))
}

/// PUT /api/ai/{id}/final-message
pub async fn update_final_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<FinalMessageRequest>,
) -> AppResult<Json<ApiResponse<AiMessage>>> {
    let final_message = required(input.final_message, "finalMessage")?;
    validate_required("finalMessage", &final_message, MAX_MESSAGE_LENGTH)?;

    let draft = DraftWriter::from_state(&state)
        .set_final_message(auth.user_id, id, &final_message)
        .await?;
    Ok(Json(
        ApiResponse::ok(draft).with_message("Final message updated successfully"),
    ))
}

/// POST /api/ai/{id}/send
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SentDraft>>> {
    let dispatcher = MessageDispatcher::from_state(&state);
    let sent = DraftWriter::from_state(&state)
        .send(&dispatcher, auth.user_id, id)
        .await?;
    Ok(Json(
        ApiResponse::ok(sent).with_message("AI message sent successfully"),
    ))
}
