use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::errors::ConfigError;

pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Language-model service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub quick_max_tokens: u32,
    pub timeout_secs: u64,
    /// Upper bound on web searches per call, unset means provider default
    pub max_searches: Option<u32>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 4096,
            quick_max_tokens: 2048,
            timeout_secs: 120,
            max_searches: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Market named in the prompts
    pub market: String,
    pub category_delay_ms: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            market: "España".to_string(),
            category_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub next_check_days: u32,
    pub action_hint: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            next_check_days: 7,
            action_hint: "⚡ Actualiza CloudKit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub catalog: PathBuf,
    pub history: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("config.json"),
            history: PathBuf::from("price_history.json"),
        }
    }
}

/// Runtime settings, loaded from an optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: ModelSettings,
    pub telegram: TelegramSettings,
    pub scan: ScanSettings,
    pub report: ReportSettings,
    pub paths: PathSettings,
}

/// Secrets pulled from the environment
#[derive(Clone)]
pub struct Credentials {
    pub anthropic_api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("anthropic_api_key", &"***")
            .field("telegram_bot_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every credential through `lookup`; empty values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |key: &'static str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(key);
                String::new()
            }
        };

        let anthropic_api_key = fetch(ANTHROPIC_API_KEY);
        let telegram_bot_token = fetch(TELEGRAM_BOT_TOKEN);
        let telegram_chat_id = fetch(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        Ok(Self {
            anthropic_api_key,
            telegram_bot_token,
            telegram_chat_id,
        })
    }
}

/// Settings loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from `path`, or fall back to defaults when no file is given
    pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_settings(&content)
    }

    pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
