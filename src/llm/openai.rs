use super::client::LlmClient;
use super::types::*;
use crate::{
    Error, Result,
    config::{LlmConfig, Provider},
};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use tracing::debug;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a health monitoring assistant.";

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    has_api_key: bool,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Self {
        let api_key = config.api_key.clone().unwrap_or_default();
        let has_api_key = !api_key.is_empty();

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);

        if let Some(base_url) = config.base_url.as_deref().filter(|url| !url.is_empty()) {
            openai_config = openai_config.with_api_base(base_url);
        }

        Self {
            client: Client::with_config(openai_config),
            has_api_key,
            model: config.model().to_string(),
        }
    }
}

fn build_messages(request: &GenerationRequest) -> Result<Vec<ChatCompletionRequestMessage>> {
    let system_prompt = request
        .system_prompt
        .clone()
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(ChatCompletionRequestSystemMessageContent::Text(
            system_prompt,
        ))
        .build()
        .map_err(|e| Error::llm(format!("Failed to build system message: {}", e)))?;

    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(ChatCompletionRequestUserMessageContent::Text(
            request.prompt.clone(),
        ))
        .build()
        .map_err(|e| Error::llm(format!("Failed to build user message: {}", e)))?;

    Ok(vec![system.into(), user.into()])
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn provider(&self) -> &'static str {
        Provider::OpenAi.display_name()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        if !self.has_api_key {
            return Err(Error::MissingApiKey {
                var: Provider::OpenAi.api_key_var(),
            });
        }

        debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            "Creating chat completion"
        );

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .messages(build_messages(&request)?);

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        if let Some(max_tokens) = request.max_output_tokens {
            request_builder.max_tokens(max_tokens);
        }

        let openai_request = request_builder.build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let candidates = response
            .choices
            .into_iter()
            .map(|choice| Candidate {
                index: choice.index,
                content: Some(CandidateContent {
                    role: Some(format!("{:?}", choice.message.role).to_lowercase()),
                    parts: choice.message.content.into_iter().collect(),
                }),
                finish_reason: choice.finish_reason.map(|fr| format!("{fr:?}")),
            })
            .collect();

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(GenerationResponse {
            model: response.model,
            candidates,
            usage,
        })
    }
}
