use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vitals_advisor::{
    Error, Result,
    llm::{
        Candidate, CandidateContent, GenerationRequest, GenerationResponse, LlmClient, Usage,
    },
};

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub provider: &'static str,
    pub response: Option<GenerationResponse>,
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            provider: "Gemini",
            response: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_response(mut self, response: GenerationResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &'static str {
        self.provider
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(error) = &self.error {
            return Err(Error::llm(error.clone()));
        }

        Ok(self
            .response
            .clone()
            .unwrap_or_else(|| create_mock_response(&[])))
    }
}

/// Response whose candidates each carry one text part.
pub fn create_mock_response(texts: &[&str]) -> GenerationResponse {
    GenerationResponse {
        model: "gemini-1.5-flash".to_string(),
        candidates: texts
            .iter()
            .enumerate()
            .map(|(index, text)| Candidate {
                index: index as u32,
                content: Some(CandidateContent::text("model", *text)),
                finish_reason: Some("STOP".to_string()),
            })
            .collect(),
        usage: Some(Usage {
            prompt_tokens: 40,
            completion_tokens: 20,
            total_tokens: 60,
        }),
    }
}
