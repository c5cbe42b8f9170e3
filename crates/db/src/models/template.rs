//! Message template model and DTOs.

use leadflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `templates` table.
///
/// Templates without an owner (`user_id IS NULL`) are global: seeded by
/// migration, visible to every user, and read-only.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: DbId,
    pub name: String,
    pub channel: String,
    pub content: String,
    pub placeholders: Vec<String>,
    pub user_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Template {
    pub fn is_global(&self) -> bool {
        self.user_id.is_none()
    }
}

/// DTO for creating a template. Missing text fields deserialize as empty
/// strings and are rejected by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTemplate {
    pub name: String,
    pub channel: String,
    pub content: String,
    pub placeholders: Option<Vec<String>>,
    pub lead_id: Option<DbId>,
}

/// DTO for updating a template. All fields are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplate {
    pub name: Option<String>,
    pub channel: Option<String>,
    pub content: Option<String>,
    pub placeholders: Option<Vec<String>>,
}
