use async_trait::async_trait;
use mindcare_core::client::GeminiClient;
use mindcare_core::errors::GeminiError;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Gemini call failed: {0}")]
    Api(#[from] GeminiError),

    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}

type Result<T> = std::result::Result<T, GenerationError>;

/// Backend that turns a fully assembled prompt into raw model text.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier reported by the health endpoint
    fn model_name(&self) -> &str;
}

#[async_trait]
impl ResponseGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.generate_text(prompt).await?)
    }

    fn model_name(&self) -> &str {
        GeminiClient::model_name(self)
    }
}

/// Issue the single outbound call, bounded by `timeout`. No retries.
pub async fn generate_response(
    generator: &dyn ResponseGenerator,
    prompt: &str,
    timeout: Duration,
) -> Result<String> {
    info!(
        model = generator.model_name(),
        prompt_len = prompt.len(),
        "Requesting model response"
    );

    match tokio::time::timeout(timeout, generator.generate(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(timeout)),
    }
}
