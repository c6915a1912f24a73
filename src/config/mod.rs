mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::PathBuf};

/// Where the settings came from, reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    /// The file was absent; defaults plus environment were used.
    Defaults { missing: String },
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
    pub dotenv: Option<PathBuf>,
}

/// Loads `.env`, the YAML config file and environment overrides, in that order.
pub async fn load() -> Result<LoadedConfig> {
    let dotenv = dotenvy::dotenv().ok();

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut loaded = load_from(&config_path, |key| env::var(key).ok()).await?;
    loaded.dotenv = dotenv;

    Ok(loaded)
}

/// Reads the YAML file at `config_path` (if present) and applies `env` on top.
pub async fn load_from<F>(config_path: &str, env: F) -> Result<LoadedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let (contents, source) = match tokio::fs::read_to_string(config_path).await {
        Ok(contents) => (Some(contents), ConfigSource::File(config_path.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (
            None,
            ConfigSource::Defaults {
                missing: config_path.to_string(),
            },
        ),
        Err(e) => return Err(e.into()),
    };

    Ok(LoadedConfig {
        config: Config::from_sources(contents.as_deref(), env)?,
        source,
        dotenv: None,
    })
}

impl Config {
    /// Builds a config from optional YAML text and an environment lookup.
    ///
    /// Environment values win over the file. Empty values are treated as unset.
    pub fn from_sources<F>(yaml: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = match yaml {
            Some(contents) if !contents.trim().is_empty() => serde_yaml::from_str(contents)?,
            _ => Config::default(),
        };

        let var = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        if let Some(provider) = var("LLM_PROVIDER") {
            let provider: Provider = provider.parse()?;
            // File settings written for another provider must not follow the switch.
            if provider != config.llm.provider {
                config.llm.api_key = None;
                config.llm.model = None;
                config.llm.base_url = None;
            }
            config.llm.provider = provider;
        }
        if let Some(model) = var("LLM_MODEL") {
            config.llm.model = Some(model);
        }
        if let Some(base_url) = var("LLM_BASE_URL") {
            config.llm.base_url = Some(base_url);
        }
        if let Some(api_key) = var(config.llm.provider.api_key_var()) {
            config.llm.api_key = Some(api_key);
        }
        if config.llm.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            config.llm.api_key = None;
        }

        if let Some(host) = var("HOST") {
            config.server.host = host;
        }
        if let Some(port) = var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
        }
        if let Some(level) = var("LOG_LEVEL") {
            config.server.logs.level = level;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = Config::from_sources(None, env_from(&[])).unwrap();

        assert_eq!(config.llm.provider, Provider::Gemini);
        assert_eq!(config.llm.model(), "gemini-1.5-flash");
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.logs.level, "info");
    }

    #[test]
    fn test_gemini_key_read_from_env() {
        let config =
            Config::from_sources(None, env_from(&[("GEMINI_API_KEY", "secret")])).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_key_for_other_provider_is_ignored() {
        let config =
            Config::from_sources(None, env_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_empty_env_value_counts_as_unset() {
        let config = Config::from_sources(None, env_from(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_env_overrides_yaml() {
        let yaml = r#"
server:
  port: 9000
llm:
  provider: gemini
  api_key: from-file
"#;
        let config = Config::from_sources(
            Some(yaml),
            env_from(&[
                ("LLM_PROVIDER", "openai"),
                ("OPENAI_API_KEY", "sk-env"),
                ("PORT", "9100"),
            ]),
        )
        .unwrap();

        assert_eq!(config.llm.provider, Provider::OpenAi);
        assert_eq!(config.llm.model(), "gpt-3.5-turbo");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_provider_switch_drops_file_credentials() {
        let yaml = r#"
llm:
  provider: gemini
  api_key: gemini-file-key
  model: gemini-1.5-pro
  base_url: http://gemini.internal/v1beta
"#;
        let config =
            Config::from_sources(Some(yaml), env_from(&[("LLM_PROVIDER", "openai")])).unwrap();

        assert_eq!(config.llm.provider, Provider::OpenAi);
        assert!(config.llm.api_key.is_none());
        assert!(config.llm.base_url.is_none());
        assert_eq!(config.llm.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_same_provider_override_keeps_file_key() {
        let yaml = "llm:\n  provider: gemini\n  api_key: gemini-file-key\n";
        let config =
            Config::from_sources(Some(yaml), env_from(&[("LLM_PROVIDER", "Gemini")])).unwrap();

        assert_eq!(config.llm.api_key.as_deref(), Some("gemini-file-key"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_sources(None, env_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = Config::from_sources(None, env_from(&[("LLM_PROVIDER", "claude")]));
        assert!(result.unwrap_err().to_string().contains("Unknown LLM provider"));
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let result = Config::from_sources(Some("server: [unclosed"), env_from(&[]));
        assert!(matches!(result, Err(Error::Yaml(_))));
    }
}
