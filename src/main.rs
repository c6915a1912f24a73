use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};
use vitals_advisor::{
    config::{self, ConfigSource, LoadedConfig},
    server,
};

/// `RUST_LOG` wins over `server.logs.level`; a bare level name is checked up front.
fn init_tracing(configured_level: &str) -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| configured_level.to_string());

    if !filter.contains('=') && filter.parse::<LevelFilter>().is_err() {
        bail!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            filter
        );
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter)?)
        .json()
        .init();

    Ok(())
}

fn report_startup(loaded: &LoadedConfig) {
    match &loaded.dotenv {
        Some(path) => info!(path = %path.display(), "Loaded environment file"),
        None => info!("No .env file loaded"),
    }

    match &loaded.source {
        ConfigSource::File(path) => info!(path = %path, "Loaded configuration file"),
        ConfigSource::Defaults { missing } => {
            warn!(path = %missing, "Config file not found, using defaults")
        }
    }

    let llm = &loaded.config.llm;
    info!(provider = %llm.provider, model = %llm.model(), "Suggestion backend selected");

    if llm.api_key.is_none() {
        warn!(
            "{} is not set; suggestion requests will fail until it is provided",
            llm.provider.api_key_var()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = config::load()
        .await
        .context("Failed to load configuration")?;

    init_tracing(&loaded.config.server.logs.level)?;
    report_startup(&loaded);

    server::run(loaded.config).await?;

    Ok(())
}
