use serde::{Deserialize, Serialize};

/// Provider-neutral generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub model: String,
    pub candidates: Vec<Candidate>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub index: u32,
    /// `None` when the provider withheld the content, e.g. a safety block.
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateContent {
    pub role: Option<String>,
    pub parts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl CandidateContent {
    pub fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![text.into()],
        }
    }
}
