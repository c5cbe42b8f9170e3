//! Outreach copy generation through an OpenAI-compatible chat API.
//!
//! [`OpenAiClient`] sends a single chat-completions request per draft.
//! Configuration comes from the environment; without `OPENAI_API_KEY`,
//! [`AiConfig::from_env`] returns `None` and callers use canned copy instead.

use std::sync::Arc;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;

/// HTTP request timeout for one generation call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for generation failures.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Building the HTTP client failed.
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),

    /// The provider rejected the request or could not be reached.
    #[error("AI provider error: {0}")]
    Provider(#[from] OpenAIError),

    /// The provider answered but produced no text.
    #[error("AI provider returned an empty completion")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// AiConfig
// ---------------------------------------------------------------------------

/// Configuration for the chat-completions client.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    /// API root without the trailing `/chat/completions`.
    pub base_url: String,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable          | Required | Default                     |
    /// |-------------------|----------|-----------------------------|
    /// | `OPENAI_API_KEY`  | yes      |                             |
    /// | `OPENAI_MODEL`    | no       | `gpt-3.5-turbo`             |
    /// | `OPENAI_BASE_URL` | no       | `https://api.openai.com/v1` |
    pub fn from_env() -> Option<Self> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Some(Self {
            api_key: var("OPENAI_API_KEY")?,
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Base URL in the form the client appends `/chat/completions` to.
    fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

// ---------------------------------------------------------------------------
// TextGenerator
// ---------------------------------------------------------------------------

/// One generation request: a fixed system instruction plus the user prompt.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Something that turns a prompt into outreach copy.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;
}

fn chat_request(
    model: &str,
    request: &GenerationRequest,
) -> Result<CreateChatCompletionRequest, AiError> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(request.system.as_str())
        .build()?;
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(request.prompt.as_str())
        .build()?;

    Ok(CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(vec![
            ChatCompletionRequestMessage::System(system),
            ChatCompletionRequestMessage::User(user),
        ])
        .max_tokens(request.max_tokens)
        .temperature(request.temperature)
        .build()?)
}

/// Text of the first choice, trimmed. Blank or missing is an error.
fn completion_text(content: Option<String>) -> Result<String, AiError> {
    content
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(AiError::EmptyResponse)
}

// ---------------------------------------------------------------------------
// OpenAiClient
// ---------------------------------------------------------------------------

/// Chat-completions client for OpenAI and API-compatible providers.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiClient {
    /// Create a client with a pre-configured HTTP timeout.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let openai = OpenAIConfig::new()
            .with_api_key(config.api_key.as_str())
            .with_api_base(config.api_base());
        let client = Client::with_config(openai).with_http_client(http);

        Ok(Self {
            client: Arc::new(client),
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let body = chat_request(&self.model, request)?;
        let response = self.client.chat().create(body).await.map_err(|e| {
            tracing::warn!(error = %e, model = %self.model, "AI provider rejected request");
            e
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        let text = completion_text(content)?;
        tracing::debug!(model = %self.model, chars = text.len(), "AI completion received");
        Ok(text)
    }
}
