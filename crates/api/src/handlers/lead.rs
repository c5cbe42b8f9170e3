//! Handlers for the `/leads` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use leadflow_core::error::CoreError;
use leadflow_core::leads::{ServiceStatus, ServiceType};
use leadflow_core::types::DbId;
use leadflow_core::validation::{
    normalize_optional, validate_bulk_ids, validate_optional_email, validate_optional_website,
    validate_required, MAX_CLIENT_NAME_LENGTH,
};
use leadflow_db::models::ai_message::AiMessage;
use leadflow_db::models::lead::{CreateLead, Lead, LeadQuery, UpdateLead};
use leadflow_db::models::message::Message;
use leadflow_db::repositories::{AiMessageRepo, LeadRepo, MessageRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{ApiResponse, Pagination};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A lead with its send history and AI drafts, newest first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDetail {
    #[serde(flatten)]
    pub lead: Lead,
    pub messages: Vec<Message>,
    pub ai_messages: Vec<AiMessage>,
}

/// Request body for `PATCH /leads/bulk/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusRequest {
    #[serde(default)]
    pub lead_ids: Vec<DbId>,
    pub service_status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkStatusResponse {
    pub updated: u64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Lead", id }
}

fn validate_service_type(value: &str) -> Result<(), CoreError> {
    ServiceType::from_str_value(value)
        .map(|_| ())
        .map_err(CoreError::Validation)
}

fn validate_service_status(value: &str) -> Result<(), CoreError> {
    ServiceStatus::from_str_value(value)
        .map(|_| ())
        .map_err(CoreError::Validation)
}

/// Trim the optional text fields and check the ones with a shape.
fn normalize_create(mut input: CreateLead) -> Result<CreateLead, CoreError> {
    input.client_name = input.client_name.trim().to_string();
    validate_required("clientName", &input.client_name, MAX_CLIENT_NAME_LENGTH)?;
    if input.service_type.trim().is_empty() {
        return Err(CoreError::Validation("serviceType is required".into()));
    }
    validate_service_type(&input.service_type)?;

    input.email = normalize_optional(input.email);
    input.phone = normalize_optional(input.phone);
    input.whatsapp = normalize_optional(input.whatsapp);
    input.website = normalize_optional(input.website);
    input.address = normalize_optional(input.address);
    input.source = normalize_optional(input.source);
    input.notes = normalize_optional(input.notes);
    input.service_status = normalize_optional(input.service_status);

    validate_optional_email(input.email.as_deref())?;
    validate_optional_website(input.website.as_deref())?;
    if let Some(status) = &input.service_status {
        validate_service_status(status)?;
    }
    Ok(input)
}

/// Same trimming as [`normalize_create`]. A blank optional field becomes
/// `None`, which leaves the stored value unchanged.
fn normalize_update(mut input: UpdateLead) -> Result<UpdateLead, CoreError> {
    if let Some(name) = input.client_name.take() {
        let name = name.trim().to_string();
        validate_required("clientName", &name, MAX_CLIENT_NAME_LENGTH)?;
        input.client_name = Some(name);
    }

    input.email = normalize_optional(input.email);
    input.phone = normalize_optional(input.phone);
    input.whatsapp = normalize_optional(input.whatsapp);
    input.website = normalize_optional(input.website);
    input.address = normalize_optional(input.address);
    input.source = normalize_optional(input.source);
    input.notes = normalize_optional(input.notes);
    input.service_type = normalize_optional(input.service_type);
    input.service_status = normalize_optional(input.service_status);

    if let Some(service_type) = &input.service_type {
        validate_service_type(service_type)?;
    }
    if let Some(status) = &input.service_status {
        validate_service_status(status)?;
    }
    validate_optional_email(input.email.as_deref())?;
    validate_optional_website(input.website.as_deref())?;
    Ok(input)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/leads
pub async fn create_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateLead>,
) -> AppResult<(StatusCode, Json<ApiResponse<Lead>>)> {
    let input = normalize_create(input)?;
    let lead = LeadRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(lead_id = lead.id, user_id = auth.user_id, "Lead created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(lead).with_message("Lead created successfully")),
    ))
}

/// GET /api/leads?serviceType=&serviceStatus=&emailSent=&whatsappSent=&search=&page=&limit=
pub async fn list_leads(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<LeadQuery>,
) -> AppResult<Json<ApiResponse<Vec<Lead>>>> {
    if let Some(service_type) = &params.service_type {
        validate_service_type(service_type)?;
    }
    if let Some(status) = &params.service_status {
        validate_service_status(status)?;
    }

    let leads = LeadRepo::list_for_user(&state.pool, auth.user_id, &params).await?;
    let total = LeadRepo::count_for_user(&state.pool, auth.user_id, &params).await?;

    let pagination = Pagination::new(params.page(), params.limit(), total);
    Ok(Json(ApiResponse::ok(leads).with_pagination(pagination)))
}

/// GET /api/leads/{id}
pub async fn get_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<LeadDetail>>> {
    let lead = LeadRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let messages = MessageRepo::list_for_lead(&state.pool, id).await?;
    let ai_messages = AiMessageRepo::list_for_lead(&state.pool, id).await?;

    Ok(Json(ApiResponse::ok(LeadDetail {
        lead,
        messages,
        ai_messages,
    })))
}

/// PUT /api/leads/{id}
pub async fn update_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLead>,
) -> AppResult<Json<ApiResponse<Lead>>> {
    let input = normalize_update(input)?;
    let lead = LeadRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(
        ApiResponse::ok(lead).with_message("Lead updated successfully"),
    ))
}

/// DELETE /api/leads/{id}
pub async fn delete_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !LeadRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(lead_id = id, user_id = auth.user_id, "Lead deleted");
    Ok(Json(ApiResponse::message("Lead deleted successfully")))
}

/// PATCH /api/leads/bulk/status
///
/// Ids the caller does not own are skipped; `updated` counts the rest.
pub async fn bulk_update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BulkStatusRequest>,
) -> AppResult<Json<ApiResponse<BulkStatusResponse>>> {
    validate_bulk_ids(&input.lead_ids)?;
    let status = super::required(input.service_status.as_deref(), "serviceStatus")?;
    validate_service_status(status)?;

    let updated =
        LeadRepo::bulk_update_status(&state.pool, auth.user_id, &input.lead_ids, status).await?;
    Ok(Json(
        ApiResponse::ok(BulkStatusResponse { updated }).with_message("Leads updated successfully"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn input() -> CreateLead {
        CreateLead {
            client_name: "  Ana  ".into(),
            service_type: "SEO".into(),
            email: Some("  ".into()),
            website: Some(" https://ana.dev ".into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_trims_and_drops_blank_fields() {
        let lead = normalize_create(input()).unwrap();
        assert_eq!(lead.client_name, "Ana");
        assert_eq!(lead.email, None);
        assert_eq!(lead.website.as_deref(), Some("https://ana.dev"));
    }

    #[test]
    fn create_requires_name_and_known_service_type() {
        let mut missing_name = input();
        missing_name.client_name = " ".into();
        assert!(normalize_create(missing_name).is_err());

        let mut bad_type = input();
        bad_type.service_type = "PAINTING".into();
        assert!(normalize_create(bad_type).is_err());

        let mut missing_type = input();
        missing_type.service_type = String::new();
        let err = normalize_create(missing_type).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: serviceType is required");
    }

    #[test]
    fn update_checks_only_present_fields() {
        assert!(normalize_update(UpdateLead::default()).is_ok());
        let bad = UpdateLead {
            service_status: Some("MAYBE".into()),
            ..Default::default()
        };
        assert_matches!(normalize_update(bad), Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_trims_and_treats_blank_as_unchanged() {
        let update = normalize_update(UpdateLead {
            client_name: Some("  Ana  ".into()),
            email: Some("   ".into()),
            phone: Some(" 555-0101 ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(update.client_name.as_deref(), Some("Ana"));
        assert_eq!(update.email, None);
        assert_eq!(update.phone.as_deref(), Some("555-0101"));
    }

    #[test]
    fn update_rejects_blank_name() {
        let blank = UpdateLead {
            client_name: Some("  ".into()),
            ..Default::default()
        };
        assert_matches!(normalize_update(blank), Err(CoreError::Validation(_)));
    }
}
