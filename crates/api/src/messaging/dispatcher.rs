//! Single-message dispatch.
//!
//! Every attempt is recorded before the transport is touched, so the
//! history shows failed attempts as well as successful ones.

use std::sync::Arc;

use leadflow_core::channels::Channel;
use leadflow_core::error::CoreError;
use leadflow_core::types::DbId;
use leadflow_db::models::lead::Lead;
use leadflow_db::models::message::Message;
use leadflow_db::repositories::{LeadRepo, MessageRepo};
use leadflow_db::DbPool;
use leadflow_outreach::EmailTransport;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const NO_EMAIL_ADDRESS: &str =
    "Lead has no email address. Add an email to this lead to send.";

pub const EMAIL_NOT_CONFIGURED: &str =
    "Email is not configured. Set SMTP_HOST, SMTP_USER, and SMTP_PASS in the environment.";

/// Sends one message to one lead and records the outcome.
///
/// Owns its handles so it can be moved into a spawned batch task.
#[derive(Clone)]
pub struct MessageDispatcher {
    pool: DbPool,
    mailer: Option<Arc<dyn EmailTransport>>,
}

impl MessageDispatcher {
    pub fn new(pool: DbPool, mailer: Option<Arc<dyn EmailTransport>>) -> Self {
        Self { pool, mailer }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.pool.clone(), state.mailer.clone())
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Send `body` to the caller's lead `lead_id` over `channel`.
    ///
    /// Fails with `NotFound` if the lead does not exist or belongs to
    /// someone else; nothing is recorded in that case.
    pub async fn send(
        &self,
        user_id: DbId,
        lead_id: DbId,
        channel: Channel,
        body: &str,
    ) -> AppResult<Message> {
        let lead = LeadRepo::find_for_user(&self.pool, lead_id, user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Lead",
                id: lead_id,
            })?;
        self.deliver(&lead, channel, body).await
    }

    /// Send `body` to an already loaded (and ownership-checked) lead.
    ///
    /// Inserts a `PENDING` row, attempts delivery, then moves the row to
    /// `FAILED`, or to `SENT` together with the lead's sent flag and
    /// approach count in one transaction.
    pub async fn deliver(&self, lead: &Lead, channel: Channel, body: &str) -> AppResult<Message> {
        let pending = MessageRepo::create_pending(&self.pool, lead.id, channel, body).await?;

        if let Err(err) = self.transmit(lead, channel, body).await {
            MessageRepo::mark_failed(&self.pool, pending.id).await?;
            tracing::warn!(
                message_id = pending.id,
                lead_id = lead.id,
                %channel,
                error = %err,
                "Message delivery failed"
            );
            return Err(err);
        }

        let sent = MessageRepo::mark_sent(&self.pool, pending.id, lead.id, channel)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Message {} left PENDING before delivery finished",
                    pending.id
                ))
            })?;

        tracing::info!(message_id = sent.id, lead_id = lead.id, %channel, "Message sent");
        Ok(sent)
    }

    async fn transmit(&self, lead: &Lead, channel: Channel, body: &str) -> AppResult<()> {
        match channel {
            Channel::Email => {
                let to = lead
                    .usable_email()
                    .ok_or_else(|| CoreError::FailedPrecondition(NO_EMAIL_ADDRESS.into()))?;
                let mailer = self
                    .mailer
                    .as_ref()
                    .ok_or_else(|| CoreError::FailedPrecondition(EMAIL_NOT_CONFIGURED.into()))?;
                mailer
                    .send(to, body)
                    .await
                    .map_err(|e| CoreError::Upstream(e.to_string()))?;
            }
            Channel::Whatsapp => {
                // No WhatsApp transport exists; the attempt is recorded as sent.
                tracing::debug!(lead_id = lead.id, "WhatsApp has no transport, recording as sent");
            }
        }
        Ok(())
    }
}
