use super::types::{INVALID_PAYLOAD, SUGGESTION_FAILED_PREFIX, SuggestionResponse};
use crate::suggestion::{HealthReading, SuggestionService};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub suggestions: Arc<SuggestionService>,
}

pub async fn suggest(
    State(state): State<AppState>,
    payload: Result<Json<HealthReading>, JsonRejection>,
) -> Result<Json<SuggestionResponse>, (StatusCode, String)> {
    let request_id = Uuid::new_v4();

    let Json(reading) = payload.map_err(|rejection| {
        warn!(%request_id, "Rejected suggestion request: {}", rejection.body_text());
        (StatusCode::BAD_REQUEST, INVALID_PAYLOAD.to_string())
    })?;

    info!(
        %request_id,
        temperature = reading.temperature,
        pulse = reading.pulse,
        oxygen_saturation = reading.oxygen_saturation,
        language = %reading.language,
        "Received suggestion request"
    );

    match state.suggestions.suggest(&reading).await {
        Ok(result) => {
            info!(%request_id, "Suggestion generated");
            Ok(Json(SuggestionResponse {
                suggestion: result.text,
            }))
        }
        Err(e) => {
            error!(%request_id, "Failed to get suggestion: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}{}", SUGGESTION_FAILED_PREFIX, e),
            ))
        }
    }
}
