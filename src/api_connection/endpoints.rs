use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chat-completion services speaking the OpenAI wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CompletionProviderKind {
    OpenAi,
    OpenRouter,
}

impl CompletionProviderKind {
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            CompletionProviderKind::OpenAi => "https://api.openai.com/v1/chat/completions",
            CompletionProviderKind::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
        }
    }
}

impl fmt::Display for CompletionProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionProviderKind::OpenAi => write!(f, "openai"),
            CompletionProviderKind::OpenRouter => write!(f, "openrouter"),
        }
    }
}

impl FromStr for CompletionProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(CompletionProviderKind::OpenAi),
            "openrouter" => Ok(CompletionProviderKind::OpenRouter),
            other => Err(format!("unknown completion provider '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    // The service sends `null` content for refusals and tool calls.
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: Option<u32>,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<ChatCompletionUsage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the service produced any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_unset_sampling_fields() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::user("hi")],
            temperature: None,
            max_tokens: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert!(value.get("max_tokens").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_first_text_handles_null_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(response.first_text(), None);

        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "  Eat more greens.\n"}}]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("Eat more greens."));
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("OpenAI".parse::<CompletionProviderKind>(), Ok(CompletionProviderKind::OpenAi));
        assert_eq!(
            "openrouter".parse::<CompletionProviderKind>(),
            Ok(CompletionProviderKind::OpenRouter)
        );
        assert!("cerebras".parse::<CompletionProviderKind>().is_err());
        assert_eq!(CompletionProviderKind::OpenRouter.to_string(), "openrouter");
    }
}
