//! Sequential bulk sends with per-lead results.
//!
//! Leads are processed one at a time in input order. A failure is recorded
//! in that lead's result and the batch moves on. Batches run on their own
//! Tokio task (see [`run_detached`]) so a dropped connection or request
//! timeout does not stop the remaining sends.

use std::collections::HashMap;
use std::future::Future;

use leadflow_core::channels::Channel;
use leadflow_core::error::CoreError;
use leadflow_core::placeholder::render;
use leadflow_core::types::DbId;
use leadflow_db::models::lead::Lead;
use leadflow_db::models::message::Message;
use leadflow_db::repositories::LeadRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::messaging::dispatcher::MessageDispatcher;

/// Outcome for one lead of a bulk send.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSendResult {
    pub lead_id: DbId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkSendResult {
    fn from_outcome(lead_id: DbId, outcome: AppResult<Message>) -> Self {
        match outcome {
            Ok(message) => Self {
                lead_id,
                success: true,
                message: Some(message),
                error: None,
            },
            Err(err) => Self {
                lead_id,
                success: false,
                message: None,
                error: Some(err.public_message()),
            },
        }
    }
}

/// `true` when every item in the batch succeeded.
pub fn all_succeeded(results: &[BulkSendResult]) -> bool {
    results.iter().all(|r| r.success)
}

/// Send the same literal `body` to each lead.
pub async fn send_to_each(
    dispatcher: MessageDispatcher,
    user_id: DbId,
    lead_ids: Vec<DbId>,
    channel: Channel,
    body: String,
) -> AppResult<Vec<BulkSendResult>> {
    let mut results = Vec::with_capacity(lead_ids.len());
    for lead_id in lead_ids {
        let outcome = dispatcher.send(user_id, lead_id, channel, &body).await;
        results.push(BulkSendResult::from_outcome(lead_id, outcome));
    }
    log_batch("bulk send", user_id, channel, &results);
    Ok(results)
}

/// Render `template` against each lead's fields and send the result.
///
/// The caller's leads are loaded in one query up front; ids they do not
/// own are reported as not found without touching the database again.
pub async fn send_personalized(
    dispatcher: MessageDispatcher,
    user_id: DbId,
    lead_ids: Vec<DbId>,
    channel: Channel,
    template: String,
) -> AppResult<Vec<BulkSendResult>> {
    let leads: HashMap<DbId, Lead> =
        LeadRepo::find_many_for_user(dispatcher.pool(), user_id, &lead_ids)
            .await?
            .into_iter()
            .map(|lead| (lead.id, lead))
            .collect();

    let mut results = Vec::with_capacity(lead_ids.len());
    for lead_id in lead_ids {
        let outcome = match leads.get(&lead_id) {
            Some(lead) => {
                let body = render(&template, &lead.placeholder_values());
                dispatcher.deliver(lead, channel, &body).await
            }
            None => Err(CoreError::NotFound {
                entity: "Lead",
                id: lead_id,
            }
            .into()),
        };
        results.push(BulkSendResult::from_outcome(lead_id, outcome));
    }
    log_batch("personalized bulk send", user_id, channel, &results);
    Ok(results)
}

/// Run a batch on its own task and wait for it.
///
/// If the awaiting request is dropped, the task keeps going to completion.
pub async fn run_detached<T, F>(batch: F) -> AppResult<T>
where
    T: Send + 'static,
    F: Future<Output = AppResult<T>> + Send + 'static,
{
    tokio::spawn(batch)
        .await
        .map_err(|e| AppError::InternalError(format!("Bulk task failed: {e}")))?
}

fn log_batch(kind: &str, user_id: DbId, channel: Channel, results: &[BulkSendResult]) {
    let sent = results.iter().filter(|r| r.success).count();
    tracing::info!(
        user_id,
        %channel,
        total = results.len(),
        sent,
        failed = results.len() - sent,
        "Finished {kind}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_result_carries_public_message() {
        let err: AppError = CoreError::NotFound {
            entity: "Lead",
            id: 9,
        }
        .into();
        let result = BulkSendResult::from_outcome(9, Err(err));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "leadId": 9,
                "success": false,
                "error": "Lead with id 9 not found",
            })
        );
    }

    #[test]
    fn internal_errors_are_not_leaked_per_item() {
        let err = AppError::InternalError("pool exhausted at 10.0.0.3".into());
        let result = BulkSendResult::from_outcome(1, Err(err));
        assert_eq!(result.error.as_deref(), Some("An internal error occurred"));
    }

    #[tokio::test]
    async fn detached_batch_returns_its_value() {
        let value = run_detached(async { Ok::<_, AppError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }
}
