use async_trait::async_trait;
use bytes::Bytes;

/// One piece of a prompt sent to the model
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// Raw file bytes, sent base64-encoded with their MIME type
    InlineData { mime_type: String, data: Bytes },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A hosted generative model that answers with free-form text
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send one user turn made of `parts` to `model` and return the reply text
    async fn generate(&self, model: &str, parts: Vec<ContentPart>) -> Result<String, AiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("api returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("invalid JSON in model response: {0}")]
    Parse(String),
}
