//! Refresh-token session model and DTOs.

use leadflow_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table. One row per issued refresh token.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
