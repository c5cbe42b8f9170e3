use std::sync::Arc;

use leadflow_outreach::{EmailTransport, TextGenerator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: leadflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Email transport; `None` when SMTP is not configured.
    pub mailer: Option<Arc<dyn EmailTransport>>,
    /// AI text generator; `None` when no API key is configured, in which
    /// case drafts use the canned fallback copy.
    pub generator: Option<Arc<dyn TextGenerator>>,
}
