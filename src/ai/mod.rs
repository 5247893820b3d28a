/// AI module for Offbeat
///
/// Defines the completion collaborator seam and its OpenAI-compatible implementation.
///
/// # Architecture
///
/// - `CompletionBackend` - anything that can turn a transcript into one assistant reply
/// - `openai` - chat-completions client over `reqwest`
///
/// # Usage
///
/// ```rust,no_run
/// use offbeat::ai::{CompletionBackend, GenerationParams, OpenAiBackend};
/// use offbeat::types::ChatMessage;
///
/// # async fn example() -> offbeat::ai::ChatResult<()> {
/// let backend = OpenAiBackend::new("https://api.openai.com/v1", Some("sk-...".into()));
/// let reply = backend
///     .complete(&[ChatMessage::user("Hello!")], &GenerationParams::default())
///     .await?;
/// # Ok(())
/// # }
/// ```
mod openai;

use crate::types::ChatMessage;
use async_trait::async_trait;

pub use openai::{DEFAULT_API_BASE, OpenAiBackend};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("empty reply")]
    EmptyReply,
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Fixed generation knobs sent with every completion request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl GenerationParams {
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the first candidate's content. A missing or empty reply is an error.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> ChatResult<String>;
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for std::sync::Arc<T> {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> ChatResult<String> {
        (**self).complete(messages, params).await
    }
}
