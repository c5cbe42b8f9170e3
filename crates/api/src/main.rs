use std::net::SocketAddr;
use std::sync::Arc;

use leadflow_outreach::{
    AiConfig, EmailConfig, EmailTransport, OpenAiClient, SmtpMailer, TextGenerator,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadflow_api::config::ServerConfig;
use leadflow_api::router::build_app_router;
use leadflow_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadflow_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = leadflow_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    leadflow_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    leadflow_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Outbound transports ---
    let mailer = build_mailer();
    let generator = build_generator();

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        mailer,
        generator,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped accepting connections, closing database pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// SMTP mailer, or `None` when the SMTP settings are incomplete. Email
/// sends then fail per message with a configuration error.
fn build_mailer() -> Option<Arc<dyn EmailTransport>> {
    let Some(email_config) = EmailConfig::from_env() else {
        tracing::warn!("SMTP_HOST, SMTP_USER or SMTP_PASS not set, email sending disabled");
        return None;
    };
    let host = email_config.smtp_host.clone();
    let port = email_config.smtp_port;
    match SmtpMailer::new(email_config) {
        Ok(mailer) => {
            tracing::info!(%host, port, "SMTP mailer configured");
            Some(Arc::new(mailer))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build SMTP mailer, email sending disabled");
            None
        }
    }
}

/// OpenAI client, or `None` when no API key is set. Drafts then use the
/// canned fallback copy.
fn build_generator() -> Option<Arc<dyn TextGenerator>> {
    let Some(ai_config) = AiConfig::from_env() else {
        tracing::warn!("OPENAI_API_KEY not set, AI drafts will use fallback copy");
        return None;
    };
    match OpenAiClient::new(ai_config) {
        Ok(client) => {
            tracing::info!(model = client.model(), "AI generator configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build AI client, using fallback copy");
            None
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
