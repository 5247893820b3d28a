use super::{ChatError, ChatResult, CompletionBackend, GenerationParams};
use crate::types::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Chat-completions client for OpenAI and compatible gateways.
pub struct OpenAiBackend {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiBackend {
    pub fn new(api_base: impl AsRef<str>, api_key: Option<String>) -> Self {
        let base = api_base.as_ref().trim_end_matches('/');
        Self {
            client: Client::new(),
            endpoint: format!("{base}/chat/completions"),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
pub struct OAIMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct OAIChoice {
    pub message: Option<OAIMessage>,
}

#[derive(Deserialize)]
pub struct OAIResponse {
    #[serde(default)]
    pub choices: Vec<OAIChoice>,
}

/// Pulls `choices[0].message.content` out of a response body.
pub fn parse_completion_body(body: &str) -> ChatResult<String> {
    let parsed: OAIResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|msg| msg.content)
        .filter(|content| !content.is_empty())
        .ok_or(ChatError::EmptyReply)
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> ChatResult<String> {
        let mut request = self.client.post(&self.endpoint).json(&CompletionRequest {
            model: &params.model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::Status { status, body });
        }

        parse_completion_body(&body)
    }
}
