//! Configuration loading from poyraz.toml and the environment.

use serde::Deserialize;
use std::path::Path;

/// Optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "poyraz.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Completion endpoint settings.
    #[serde(default)]
    pub llm: LlmSettings,

    /// Tool server process settings.
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct LlmSettings {
    /// OpenRouter (or compatible) API key.
    pub api_key: Option<String>,

    /// Endpoint base URL override.
    pub base_url: Option<String>,

    /// Model override.
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServerSettings {
    /// Command used to start the tool server.
    pub command: Option<String>,

    /// Extra arguments for the tool server.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Config {
    /// Load `poyraz.toml` when present, then let the environment win.
    pub fn resolve() -> Result<Self, ConfigError> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::load(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Ok(value) = std::env::var("OPENROUTER_API_KEY") {
            self.llm.api_key = Some(value);
        }
        if let Ok(value) = std::env::var("OPENROUTER_BASE_URL") {
            self.llm.base_url = Some(value);
        }
        if let Ok(value) = std::env::var("POYRAZ_MODEL") {
            self.llm.model = Some(value);
        }
        if let Ok(value) = std::env::var("POYRAZ_SERVER") {
            self.server.command = Some(value);
        }
    }

    /// The API key; required for startup.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.llm
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Command used to start the tool server.
    pub fn server_command(&self) -> &str {
        self.server.command.as_deref().unwrap_or("poyraz-server")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("API key not configured: set OPENROUTER_API_KEY or llm.api_key in poyraz.toml")]
    MissingApiKey,
}
