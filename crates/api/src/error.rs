use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use leadflow_core::error::CoreError;
use serde_json::json;

/// Message returned in place of any internal detail.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{success: false, error}`
/// envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `leadflow_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify into an HTTP status, error code, and user-facing message.
    ///
    /// Internal details are logged here and never returned to the caller.
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::FailedPrecondition(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "FAILED_PRECONDITION",
                    msg.clone(),
                ),
                CoreError::Upstream(msg) => {
                    (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }

    /// The text a caller sees for this error, also used for per-item
    /// failures in bulk results.
    pub fn public_message(&self) -> String {
        self.classify().2
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "success": false,
            "error": {
                "message": message,
                "code": code,
            },
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Check constraint violations (`ck_`) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation.
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // PostgreSQL check constraint violation.
                Some("23514") if constraint.starts_with("ck_") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
