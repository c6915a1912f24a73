pub mod handlers;
pub mod types;

use crate::{Result, config::Config, llm, suggestion::SuggestionService};
use axum::{Router, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/suggest", post(handlers::suggest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let client = llm::from_config(&config.llm)?;

    let app_state = handlers::AppState {
        suggestions: Arc::new(SuggestionService::new(client, &config.llm)),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
