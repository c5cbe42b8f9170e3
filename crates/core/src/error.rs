use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The request is well-formed but the target is not in a state that
    /// allows it (e.g. a lead without an email address, an unconfigured
    /// mail transport).
    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    /// An external provider (SMTP server, AI service) rejected the call.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
