//! Route definitions for the `/messages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST /send                     -> send_message
/// POST /bulk-send                -> bulk_send
/// POST /bulk-send-personalized   -> bulk_send_personalized
/// GET  /history/{lead_id}        -> message_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(message::send_message))
        .route("/bulk-send", post(message::bulk_send))
        .route(
            "/bulk-send-personalized",
            post(message::bulk_send_personalized),
        )
        .route("/history/{lead_id}", get(message::message_history))
}
