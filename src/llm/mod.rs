pub mod gemini;
#[cfg(test)]
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

pub use gemini::GeminiClient;

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Anything that turns a system instruction plus a user prompt into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system_prompt: Option<&str>, user_message: &str)
        -> Result<LlmResponse>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
