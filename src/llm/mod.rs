//! Text-generation client for the study-task prompt.
//!
//! A single-shot trait over a generative-language endpoint, with Gemini as the
//! implementation. Callers get back the first candidate's text and nothing else.

mod error;
mod gemini;

pub use error::{classify_http_status, LlmError, LlmErrorKind};
pub use gemini::{ApiKey, GeminiClient, GEMINI_API_BASE};

use async_trait::async_trait;

/// Sampling parameters sent with each request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

/// Trait for text generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the first candidate's text content.
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
        -> Result<String, LlmError>;
}
