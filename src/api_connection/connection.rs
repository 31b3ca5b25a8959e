use async_trait::async_trait;
use reqwest::Client;

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, CompletionProviderKind};
use crate::config::CompletionConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiConnectionError {
    #[error("API key not configured: {0}")]
    MissingApiKey(String),
    #[error("request timed out: {0}")]
    Timeout(reqwest::Error),
    #[error("network error: {0}")]
    NetworkError(reqwest::Error),
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    #[error("response contained no generated text")]
    EmptyResponse,
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiConnectionError::Timeout(err)
        } else {
            ApiConnectionError::NetworkError(err)
        }
    }
}

/// Anything able to answer a chat-completion request.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn call_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError>;
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct Provider {
    config: CompletionConfig,
    client: Client,
}

impl Provider {
    pub fn new(config: CompletionConfig) -> Result<Self, ApiConnectionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiConnectionError::NetworkError)?;
        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn kind(&self) -> CompletionProviderKind {
        self.config.provider
    }
}

#[async_trait]
impl CompletionBackend for Provider {
    async fn call_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        if self.config.api_key.is_empty() {
            return Err(ApiConnectionError::MissingApiKey(
                crate::config::COMPLETION_API_KEY_ENV_VAR.to_string(),
            ));
        }

        tracing::debug!(
            provider = %self.config.provider,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion"
        );

        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request);

        if self.config.provider == CompletionProviderKind::OpenRouter {
            builder = builder
                .header("HTTP-Referer", &self.config.site_url)
                .header("X-Title", &self.config.app_name);
        }

        let response = builder.send().await?;

        if response.status().is_success() {
            let body = response.text().await?;
            let chat_response: ChatCompletionResponse = serde_json::from_str(&body)?;
            if let Some(usage) = &chat_response.usage {
                tracing::debug!(total_tokens = usage.total_tokens, "chat completion finished");
            }
            Ok(chat_response)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::warn!(%status, "chat completion rejected");
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }
}
