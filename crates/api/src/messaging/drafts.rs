//! AI-drafted outreach messages.
//!
//! A draft is always produced: when no generator is configured, or the
//! provider fails, the canned fallback copy is stored instead.

use std::sync::Arc;

use leadflow_core::channels::Channel;
use leadflow_core::error::CoreError;
use leadflow_core::outreach::{
    build_prompt, fallback_message, max_tokens_for, Prospect, GENERATION_TEMPERATURE,
    SYSTEM_PROMPT,
};
use leadflow_core::types::DbId;
use leadflow_db::models::ai_message::{AiMessage, CreateAiMessage};
use leadflow_db::models::lead::Lead;
use leadflow_db::models::message::Message;
use leadflow_db::repositories::{AiMessageRepo, LeadRepo};
use leadflow_db::DbPool;
use leadflow_outreach::{GenerationRequest, TextGenerator};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::messaging::dispatcher::MessageDispatcher;
use crate::state::AppState;

/// Outcome for one lead of a bulk generation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDraftResult {
    pub lead_id: DbId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A draft after it went out, with the message record it produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentDraft {
    pub ai_message: AiMessage,
    pub message: Message,
}

/// Tone and mode chosen for a draft.
#[derive(Debug, Clone)]
pub struct DraftStyle {
    pub tone: String,
    pub mode: String,
}

/// Generates, stores, and sends AI drafts.
#[derive(Clone)]
pub struct DraftWriter {
    pool: DbPool,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl DraftWriter {
    pub fn new(pool: DbPool, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { pool, generator }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.pool.clone(), state.generator.clone())
    }

    /// Draft a message for the caller's lead and store it as `PENDING`.
    pub async fn generate(
        &self,
        user_id: DbId,
        lead_id: DbId,
        channel: Channel,
        style: &DraftStyle,
    ) -> AppResult<AiMessage> {
        let lead = LeadRepo::find_for_user(&self.pool, lead_id, user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Lead",
                id: lead_id,
            })?;

        let prospect = prospect_of(&lead);
        let prompt = build_prompt(&prospect, channel, &style.tone, &style.mode);
        let response = self.compose(&prospect, channel, &prompt).await;

        let input = CreateAiMessage {
            lead_id: lead.id,
            channel: channel.as_str().to_string(),
            ai_prompt: prompt,
            ai_response: response,
            tone: style.tone.clone(),
            mode: style.mode.clone(),
        };
        let draft = AiMessageRepo::create(&self.pool, &input).await?;
        tracing::info!(ai_message_id = draft.id, lead_id, %channel, "AI draft stored");
        Ok(draft)
    }

    /// Draft for each lead in order; one failure does not stop the batch.
    pub async fn generate_each(
        self,
        user_id: DbId,
        lead_ids: Vec<DbId>,
        channel: Channel,
        style: DraftStyle,
    ) -> AppResult<Vec<BulkDraftResult>> {
        let mut results = Vec::with_capacity(lead_ids.len());
        for lead_id in lead_ids {
            let result = match self.generate(user_id, lead_id, channel, &style).await {
                Ok(draft) => BulkDraftResult {
                    lead_id,
                    success: true,
                    data: Some(draft),
                    error: None,
                },
                Err(err) => BulkDraftResult {
                    lead_id,
                    success: false,
                    data: None,
                    error: Some(err.public_message()),
                },
            };
            results.push(result);
        }
        Ok(results)
    }

    /// Replace the user-edited text of one of the caller's drafts.
    pub async fn set_final_message(
        &self,
        user_id: DbId,
        id: DbId,
        final_message: &str,
    ) -> AppResult<AiMessage> {
        self.find_owned(user_id, id).await?;
        AiMessageRepo::update_final_message(&self.pool, id, final_message)
            .await?
            .ok_or_else(|| draft_not_found(id))
    }

    /// Send a draft as a real message and mark it `SENT`.
    ///
    /// The edited text wins over the generated one. A draft that has
    /// already gone out is a conflict; a failed delivery leaves the draft
    /// `PENDING` so it can be retried.
    pub async fn send(
        &self,
        dispatcher: &MessageDispatcher,
        user_id: DbId,
        id: DbId,
    ) -> AppResult<SentDraft> {
        let draft = self.find_owned(user_id, id).await?;
        if draft.is_sent() {
            return Err(already_sent(id));
        }

        let channel = Channel::from_str_value(&draft.channel).map_err(AppError::InternalError)?;
        let message = dispatcher
            .send(user_id, draft.lead_id, channel, draft.outgoing_text())
            .await?;

        let ai_message = AiMessageRepo::mark_sent(&self.pool, id)
            .await?
            .ok_or_else(|| already_sent(id))?;

        tracing::info!(ai_message_id = id, message_id = message.id, "AI draft sent");
        Ok(SentDraft {
            ai_message,
            message,
        })
    }

    async fn find_owned(&self, user_id: DbId, id: DbId) -> AppResult<AiMessage> {
        AiMessageRepo::find_for_user(&self.pool, id, user_id)
            .await?
            .ok_or_else(|| draft_not_found(id))
    }

    /// Ask the generator for copy, falling back to the canned message.
    async fn compose(&self, prospect: &Prospect<'_>, channel: Channel, prompt: &str) -> String {
        let Some(generator) = &self.generator else {
            return fallback_message(prospect, channel);
        };

        let request = GenerationRequest {
            system: SYSTEM_PROMPT.to_string(),
            prompt: prompt.to_string(),
            max_tokens: max_tokens_for(channel),
            temperature: GENERATION_TEMPERATURE,
        };
        match generator.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "AI generation failed, using fallback copy");
                fallback_message(prospect, channel)
            }
        }
    }
}

fn prospect_of(lead: &Lead) -> Prospect<'_> {
    Prospect {
        client_name: &lead.client_name,
        service_type: &lead.service_type,
        website: lead.website.as_deref(),
        approach_count: lead.approach_count,
        service_status: &lead.service_status,
    }
}

fn draft_not_found(id: DbId) -> AppError {
    CoreError::NotFound {
        entity: "AI message",
        id,
    }
    .into()
}

fn already_sent(id: DbId) -> AppError {
    CoreError::Conflict(format!("AI message {id} has already been sent")).into()
}
