//! Handlers for the `/templates` resource.
//!
//! Users manage their own templates; the seeded global templates are
//! visible to everyone and cannot be changed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use leadflow_core::channels::Channel;
use leadflow_core::error::CoreError;
use leadflow_core::placeholder::{extract_placeholders, render, PlaceholderValues};
use leadflow_core::types::DbId;
use leadflow_core::validation::{validate_required, MAX_MESSAGE_LENGTH, MAX_TEMPLATE_NAME_LENGTH};
use leadflow_db::models::template::{CreateTemplate, Template, UpdateTemplate};
use leadflow_db::repositories::{LeadRepo, TemplateRepo};
use serde::{Deserialize, Serialize};

use super::required;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListQuery {
    pub lead_id: Option<DbId>,
}

/// Request body for `POST /templates/render`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub template_id: Option<DbId>,
    pub data: Option<PlaceholderValues>,
    pub lead_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub rendered: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Template",
        id,
    }
}

fn validate_channel(value: &str) -> Result<(), CoreError> {
    Channel::from_str_value(value)
        .map(|_| ())
        .map_err(CoreError::Validation)
}

async fn ensure_lead_owned(state: &AppState, lead_id: DbId, user_id: DbId) -> AppResult<()> {
    LeadRepo::find_for_user(&state.pool, lead_id, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        })?;
    Ok(())
}

/// Load a template the caller may modify. Globals are visible but read-only.
async fn find_editable(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Template> {
    let template = TemplateRepo::find_visible(&state.pool, id, user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if template.is_global() {
        return Err(CoreError::Forbidden("Global templates are read-only".into()).into());
    }
    Ok(template)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/templates
pub async fn create_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateTemplate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Template>>)> {
    input.name = input.name.trim().to_string();
    validate_required("name", &input.name, MAX_TEMPLATE_NAME_LENGTH)?;
    if input.channel.trim().is_empty() {
        return Err(CoreError::Validation("channel is required".into()).into());
    }
    validate_channel(&input.channel)?;
    validate_required("content", &input.content, MAX_MESSAGE_LENGTH)?;
    if let Some(lead_id) = input.lead_id {
        ensure_lead_owned(&state, lead_id, auth.user_id).await?;
    }

    let placeholders = input
        .placeholders
        .clone()
        .unwrap_or_else(|| extract_placeholders(&input.content));
    let template = TemplateRepo::create(&state.pool, auth.user_id, &input, &placeholders).await?;

    tracing::info!(template_id = template.id, user_id = auth.user_id, "Template created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(template).with_message("Template created successfully")),
    ))
}

/// GET /api/templates
///
/// With `?leadId=`, only the caller's templates for that lead; otherwise
/// the caller's templates plus every global template.
pub async fn list_templates(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TemplateListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Template>>>> {
    let templates = match query.lead_id {
        Some(lead_id) => {
            ensure_lead_owned(&state, lead_id, auth.user_id).await?;
            TemplateRepo::list_for_lead(&state.pool, auth.user_id, lead_id).await?
        }
        None => TemplateRepo::list_visible(&state.pool, auth.user_id).await?,
    };
    Ok(Json(ApiResponse::ok(templates)))
}

/// GET /api/templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Template>>> {
    let template = TemplateRepo::find_visible(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok(template)))
}

/// PUT /api/templates/{id}
///
/// When the content changes and no placeholder list is supplied, the list
/// is re-extracted from the new content.
pub async fn update_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTemplate>,
) -> AppResult<Json<ApiResponse<Template>>> {
    find_editable(&state, id, auth.user_id).await?;

    if let Some(name) = &mut input.name {
        *name = name.trim().to_string();
        validate_required("name", name, MAX_TEMPLATE_NAME_LENGTH)?;
    }
    if let Some(channel) = &input.channel {
        validate_channel(channel)?;
    }
    if let Some(content) = &input.content {
        validate_required("content", content, MAX_MESSAGE_LENGTH)?;
        if input.placeholders.is_none() {
            input.placeholders = Some(extract_placeholders(content));
        }
    }

    let template = TemplateRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(
        ApiResponse::ok(template).with_message("Template updated successfully"),
    ))
}

/// DELETE /api/templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    find_editable(&state, id, auth.user_id).await?;
    if !TemplateRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(template_id = id, user_id = auth.user_id, "Template deleted");
    Ok(Json(ApiResponse::message("Template deleted successfully")))
}

/// POST /api/templates/render
///
/// Lead values come first; explicit `data` entries override them.
pub async fn render_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<RenderRequest>,
) -> AppResult<Json<ApiResponse<RenderResponse>>> {
    let template_id = required(input.template_id, "templateId")?;
    if input.data.is_none() && input.lead_id.is_none() {
        return Err(
            CoreError::Validation("Either data or leadId must be provided".into()).into(),
        );
    }

    let template = TemplateRepo::find_visible(&state.pool, template_id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(template_id))?;

    let mut values = PlaceholderValues::new();
    if let Some(lead_id) = input.lead_id {
        let lead = LeadRepo::find_for_user(&state.pool, lead_id, auth.user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Lead",
                id: lead_id,
            })?;
        values = lead.placeholder_values();
    }
    if let Some(data) = input.data {
        values.extend(data);
    }

    let rendered = render(&template.content, &values);
    Ok(Json(ApiResponse::ok(RenderResponse { rendered })))
}
