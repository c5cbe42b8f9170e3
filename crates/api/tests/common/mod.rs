#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use leadflow_api::auth::jwt::JwtConfig;
use leadflow_api::config::ServerConfig;
use leadflow_api::router::build_app_router;
use leadflow_api::state::AppState;
use leadflow_outreach::{
    AiError, EmailError, EmailTransport, GenerationRequest, TextGenerator,
};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Full application router with no mailer and no generator.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, None, None)
}

/// Full application router with the given outbound fakes injected.
pub fn build_test_app_with(
    pool: PgPool,
    mailer: Option<Arc<dyn EmailTransport>>,
    generator: Option<Arc<dyn TextGenerator>>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer,
        generator,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Records every email instead of sending it. Addresses listed in
/// `failing` are rejected with a transport-style error.
#[derive(Default)]
pub struct FakeMailer {
    pub sent: Mutex<Vec<(String, String)>>,
    pub failing: Vec<String>,
}

impl FakeMailer {
    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            sent: Mutex::default(),
            failing: addresses.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for FakeMailer {
    async fn send(&self, to: &str, body: &str) -> Result<(), EmailError> {
        if self.failing.iter().any(|a| a == to) {
            return Err(EmailError::Build(format!("mailbox unavailable: {to}")));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

/// Returns a fixed reply, or fails every call when `reply` is `None`.
pub struct FakeGenerator {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            prompts: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::default(),
        }
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(request.clone());
        self.reply.clone().ok_or(AiError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request("GET", uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("GET", uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("POST", uri, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PATCH", uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("DELETE", uri, Some(token))).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user through the API and return their access token.
pub async fn register_and_login(app: Router, email: &str) -> String {
    let body = serde_json::json!({
        "name": "Test User",
        "email": email,
        "password": "correct-horse-battery",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["accessToken"].as_str().unwrap().to_string()
}

/// Create a lead through the API and return its id.
pub async fn create_lead(app: Router, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json_auth(app, "/api/leads", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}
