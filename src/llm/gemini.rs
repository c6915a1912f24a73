//! Gemini `generateContent` client over the public REST API.

use super::client::LlmClient;
use super::types::*;
use crate::{
    Error, Result,
    config::{LlmConfig, Provider},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::llm(format!("failed to create Gemini client: {}", e)))?;

        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            model: config.model().to_string(),
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, method)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn provider(&self) -> &'static str {
        Provider::Gemini.display_name()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey {
            var: Provider::Gemini.api_key_var(),
        })?;

        debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            "Sending request to Gemini API"
        );

        let body = GenerateContentRequest::from(request);
        let response = self
            .client
            .post(self.api_url("generateContent"))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::llm(format!("Gemini API error {}: {}", status, text)));
        }

        let api_response: GenerateContentResponse = serde_json::from_str(&text)?;

        debug!(
            "Received Gemini response with {} candidates",
            api_response.candidates.len()
        );

        Ok(api_response.into_generation_response(&self.model))
    }
}

// Gemini wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    index: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: Some(text) }],
        }
    }
}

impl From<GenerationRequest> for GenerateContentRequest {
    fn from(request: GenerationRequest) -> Self {
        let generation_config =
            if request.temperature.is_some() || request.max_output_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_output_tokens,
                })
            } else {
                None
            };

        Self {
            contents: vec![Content::text(Some("user"), request.prompt)],
            system_instruction: request.system_prompt.map(|s| Content::text(None, s)),
            generation_config,
        }
    }
}

impl GenerateContentResponse {
    fn into_generation_response(self, requested_model: &str) -> GenerationResponse {
        let candidates = self
            .candidates
            .into_iter()
            .enumerate()
            .map(|(position, candidate)| Candidate {
                index: candidate.index.unwrap_or(position as u32),
                content: candidate.content.map(|content| CandidateContent {
                    role: content.role,
                    parts: content.parts.into_iter().filter_map(|p| p.text).collect(),
                }),
                finish_reason: candidate.finish_reason,
            })
            .collect();

        let usage = self.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        GenerationResponse {
            model: self
                .model_version
                .unwrap_or_else(|| requested_model.to_string()),
            candidates,
            usage,
        }
    }
}
