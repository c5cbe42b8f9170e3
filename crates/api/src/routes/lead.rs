//! Route definitions for the `/leads` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::lead;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// GET    /             -> list_leads
/// POST   /             -> create_lead
/// PATCH  /bulk/status  -> bulk_update_status
/// GET    /{id}         -> get_lead
/// PUT    /{id}         -> update_lead
/// DELETE /{id}         -> delete_lead
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lead::list_leads).post(lead::create_lead))
        .route("/bulk/status", patch(lead::bulk_update_status))
        .route(
            "/{id}",
            get(lead::get_lead)
                .put(lead::update_lead)
                .delete(lead::delete_lead),
        )
}
