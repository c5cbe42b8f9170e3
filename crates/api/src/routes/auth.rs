//! Route definitions for `/auth`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register  -> register
/// POST /login     -> login
/// POST /refresh   -> refresh
/// POST /logout    -> logout
/// GET  /profile   -> profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/profile", get(auth::profile))
}
