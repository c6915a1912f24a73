pub mod prompt;
pub mod sanitize;
mod types;

pub use prompt::build_prompt;
pub use sanitize::{extract_text, sanitize};
pub use types::*;

use crate::{
    Error, Result,
    config::LlmConfig,
    llm::{GenerationRequest, LlmClient},
};
use std::sync::Arc;
use tracing::debug;

/// Turns a [`HealthReading`] into cleaned-up advice from the configured model.
pub struct SuggestionService {
    client: Arc<dyn LlmClient>,
    system_prompt: Option<String>,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl SuggestionService {
    pub fn new(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            system_prompt: config.system_prompt.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    pub async fn suggest(&self, reading: &HealthReading) -> Result<SuggestionResult> {
        let provider = self.client.provider();

        let request = GenerationRequest {
            prompt: build_prompt(reading),
            system_prompt: self.system_prompt.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        let response = self.client.generate(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                model = %response.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Generation finished"
            );
        }

        let content = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .ok_or(Error::NoSuggestions { provider })?;

        let text = extract_text(&content, provider)?;

        Ok(SuggestionResult {
            text: sanitize(&text),
        })
    }
}
