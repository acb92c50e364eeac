use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("parse error: {0}")] Parse(String),
    #[error("no text content found in response")] EmptyResponse,
    #[error("generation timed out after {0}s")] Timeout(u64),
}

/// What the text is for; only demo mode and logging look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Website,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub purpose: Purpose,
    pub system: String,
    pub prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// A hosted text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model_id(&self) -> String;
    async fn generate_text(&self, request: TextRequest) -> Result<String, GenerationError>;
}
