//! AI-generated outreach drafts.

use leadflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// AI message statuses. Drafts start `PENDING` and become `SENT` once
/// dispatched.
pub const AI_STATUS_PENDING: &str = "PENDING";
pub const AI_STATUS_SENT: &str = "SENT";

/// A row from the `ai_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMessage {
    pub id: DbId,
    pub lead_id: DbId,
    pub channel: String,
    pub ai_prompt: String,
    pub ai_response: String,
    pub tone: String,
    pub mode: String,
    pub final_message: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AiMessage {
    /// The text to send: the user's edit if present, otherwise the draft.
    pub fn outgoing_text(&self) -> &str {
        self.final_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.ai_response)
    }

    pub fn is_sent(&self) -> bool {
        self.status == AI_STATUS_SENT
    }
}

/// DTO for storing a generated draft.
#[derive(Debug)]
pub struct CreateAiMessage {
    pub lead_id: DbId,
    pub channel: String,
    pub ai_prompt: String,
    pub ai_response: String,
    pub tone: String,
    pub mode: String,
}
