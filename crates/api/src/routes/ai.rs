//! Route definitions for the `/ai` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /generate             -> generate
/// POST /bulk-generate        -> bulk_generate
/// PUT  /{id}/final-message   -> update_final_message
/// POST /{id}/send            -> send
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(ai::generate))
        .route("/bulk-generate", post(ai::bulk_generate))
        .route("/{id}/final-message", put(ai::update_final_message))
        .route("/{id}/send", post(ai::send))
}
