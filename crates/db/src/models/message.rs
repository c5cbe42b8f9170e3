//! Outbound message model.

use leadflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `messages` table: one send attempt to one lead.
///
/// `channel` and `status` hold the strings from
/// [`leadflow_core::channels`].
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: DbId,
    pub lead_id: DbId,
    pub channel: String,
    pub message: String,
    pub status: String,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
