//! Repository for the `messages` table.
//!
//! A message row is written `PENDING` before any delivery attempt and moves
//! exactly once to `SENT` or `FAILED`. Both terminal updates are guarded with
//! `status = 'PENDING'` so a finished attempt can never be rewritten.

use leadflow_core::channels::{Channel, STATUS_FAILED, STATUS_PENDING, STATUS_SENT};
use leadflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::Message;

const COLUMNS: &str = "id, lead_id, channel, message, status, sent_at, created_at";

/// Provides the send-attempt lifecycle for messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Record a new send attempt in `PENDING` state.
    pub async fn create_pending(
        pool: &PgPool,
        lead_id: DbId,
        channel: Channel,
        body: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (lead_id, channel, message, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(lead_id)
            .bind(channel.as_str())
            .bind(body)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Move a pending message to `FAILED`.
    ///
    /// Returns `None` if the message is missing or no longer pending.
    pub async fn mark_failed(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!(
            "UPDATE messages SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(STATUS_FAILED)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Move a pending message to `SENT` and credit the lead, atomically.
    ///
    /// In one transaction: stamps `sent_at`, sets the lead's per-channel
    /// sent flag, and increments `approach_count`. Returns `None` (and
    /// changes nothing) if the message is missing or no longer pending.
    pub async fn mark_sent(
        pool: &PgPool,
        id: DbId,
        lead_id: DbId,
        channel: Channel,
    ) -> Result<Option<Message>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE messages SET status = $3, sent_at = NOW()
             WHERE id = $1 AND lead_id = $2 AND status = $4
             RETURNING {COLUMNS}"
        );
        let message = sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(lead_id)
            .bind(STATUS_SENT)
            .bind(STATUS_PENDING)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(message) = message else {
            tx.rollback().await?;
            return Ok(None);
        };

        let flag = match channel {
            Channel::Email => "email_sent",
            Channel::Whatsapp => "whatsapp_sent",
        };
        sqlx::query(&format!(
            "UPDATE leads SET {flag} = true, approach_count = approach_count + 1 WHERE id = $1"
        ))
        .bind(lead_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(message))
    }

    /// All messages for a lead, newest first.
    pub async fn list_for_lead(pool: &PgPool, lead_id: DbId) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages WHERE lead_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(lead_id)
            .fetch_all(pool)
            .await
    }
}
