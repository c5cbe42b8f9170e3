//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use leadflow_core::error::CoreError;
use leadflow_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity taken from an `Authorization: Bearer <token>` header.
///
/// Add it as a handler argument to require authentication:
///
/// ```ignore
/// async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<..>> {
///     LeadRepo::list_for_user(&state.pool, auth.user_id, &params).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                unauthorized("Invalid Authorization format. Expected: Bearer <token>")
            })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
