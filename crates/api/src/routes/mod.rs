pub mod ai;
pub mod auth;
pub mod health;
pub mod lead;
pub mod message;
pub mod template;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
/// /auth/profile                          current user
///
/// /leads                                 list, create
/// /leads/{id}                            get, update, delete
/// /leads/bulk/status                     bulk status update (PATCH)
///
/// /messages/send                         single send
/// /messages/bulk-send                    same body to many leads
/// /messages/bulk-send-personalized       template rendered per lead
/// /messages/history/{lead_id}            send history
///
/// /ai/generate                           draft one message
/// /ai/bulk-generate                      draft for many leads
/// /ai/{id}/final-message                 edit a draft (PUT)
/// /ai/{id}/send                          send a draft
///
/// /templates                             list, create
/// /templates/render                      render (POST)
/// /templates/{id}                        get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/leads", lead::router())
        .nest("/messages", message::router())
        .nest("/ai", ai::router())
        .nest("/templates", template::router())
}
