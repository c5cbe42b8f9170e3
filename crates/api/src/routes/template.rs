//! Route definitions for the `/templates` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::template;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET    /         -> list_templates (?leadId=)
/// POST   /         -> create_template
/// POST   /render   -> render_template
/// GET    /{id}     -> get_template
/// PUT    /{id}     -> update_template
/// DELETE /{id}     -> delete_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(template::list_templates).post(template::create_template),
        )
        .route("/render", post(template::render_template))
        .route(
            "/{id}",
            get(template::get_template)
                .put(template::update_template)
                .delete(template::delete_template),
        )
}
