//! Repository for the `ai_messages` table.
//!
//! Ownership is checked through the parent lead.

use leadflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::ai_message::{AiMessage, CreateAiMessage, AI_STATUS_PENDING, AI_STATUS_SENT};

const COLUMNS: &str = "\
    id, lead_id, channel, ai_prompt, ai_response, tone, mode, final_message, \
    status, created_at, updated_at";

/// Provides storage for generated drafts.
pub struct AiMessageRepo;

impl AiMessageRepo {
    /// Store a freshly generated draft in `PENDING` state.
    pub async fn create(pool: &PgPool, input: &CreateAiMessage) -> Result<AiMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_messages (lead_id, channel, ai_prompt, ai_response, tone, mode, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiMessage>(&query)
            .bind(input.lead_id)
            .bind(&input.channel)
            .bind(&input.ai_prompt)
            .bind(&input.ai_response)
            .bind(&input.tone)
            .bind(&input.mode)
            .bind(AI_STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Find a draft whose lead belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<AiMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_messages
             WHERE id = $1 AND lead_id IN (SELECT id FROM leads WHERE user_id = $2)"
        );
        sqlx::query_as::<_, AiMessage>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the user-edited text of a draft.
    pub async fn update_final_message(
        pool: &PgPool,
        id: DbId,
        final_message: &str,
    ) -> Result<Option<AiMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE ai_messages SET final_message = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiMessage>(&query)
            .bind(id)
            .bind(final_message)
            .fetch_optional(pool)
            .await
    }

    /// Move a pending draft to `SENT`. Returns `None` if it was not pending.
    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<Option<AiMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE ai_messages SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiMessage>(&query)
            .bind(id)
            .bind(AI_STATUS_SENT)
            .bind(AI_STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// All drafts for a lead, newest first.
    pub async fn list_for_lead(
        pool: &PgPool,
        lead_id: DbId,
    ) -> Result<Vec<AiMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_messages WHERE lead_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AiMessage>(&query)
            .bind(lead_id)
            .fetch_all(pool)
            .await
    }
}
