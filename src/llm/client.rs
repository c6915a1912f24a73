use super::types::*;
use super::{GeminiClient, OpenAiClient};
use crate::{
    Result,
    config::{LlmConfig, Provider},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name as shown to callers, e.g. `Gemini`.
    fn provider(&self) -> &'static str;

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;
}

/// Builds the client for the configured provider.
pub fn from_config(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    debug!(
        "Building {} client for model {}",
        config.provider,
        config.model()
    );

    let client: Arc<dyn LlmClient> = match config.provider {
        Provider::Gemini => Arc::new(GeminiClient::new(config)?),
        Provider::OpenAi => Arc::new(OpenAiClient::new(config)),
    };

    Ok(client)
}
