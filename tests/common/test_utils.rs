use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use std::sync::Arc;
use vitals_advisor::{
    config::LlmConfig,
    llm::LlmClient,
    server::{self, handlers::AppState},
    suggestion::SuggestionService,
};

/// Build the router around any LLM client
pub fn create_test_app(client: Arc<dyn LlmClient>) -> Router {
    create_test_app_with_config(client, &LlmConfig::default())
}

pub fn create_test_app_with_config(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Router {
    server::router(AppState {
        suggestions: Arc::new(SuggestionService::new(client, config)),
    })
}

/// A valid `/suggest` JSON body
pub fn sample_reading() -> Value {
    serde_json::json!({
        "temp": 38.5,
        "pulse": 104,
        "spO2": 94.0,
        "language": "English"
    })
}

pub fn json_request(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8181
  logs:
    level: "debug"

llm:
  provider: "gemini"
  model: "gemini-1.5-pro"
  system_prompt: "You are a careful triage nurse."
  temperature: 0.3
  max_output_tokens: 512
"#;
