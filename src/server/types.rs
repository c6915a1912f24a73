use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

pub const INVALID_PAYLOAD: &str = "Invalid request payload";

pub const SUGGESTION_FAILED_PREFIX: &str = "Failed to get suggestion: ";
