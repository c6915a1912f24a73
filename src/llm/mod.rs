pub mod client;
pub mod gemini;
pub mod openai;
pub mod types;

pub use client::{LlmClient, from_config};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use types::*;
