use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const CONFIG_FILE_NAME: &str = "config.json";

/// Values persisted by `deskreply config init`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub default_provider: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<StoredConfig>(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(&path, data)?;
        Ok(())
    }
}

/// Provider the `suggest` command uses when no flag is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyProvider {
    Gemini,
    Groq,
}

impl ReplyProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyProvider::Gemini => "gemini",
            ReplyProvider::Groq => "groq",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "gemini" => Some(ReplyProvider::Gemini),
            "groq" => Some(ReplyProvider::Groq),
            _ => None,
        }
    }
}

/// Runtime configuration with API keys already resolved, environment first,
/// stored config second. Generators receive these values at construction
/// and never consult the environment themselves.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub default_provider: ReplyProvider,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Ok(Self::resolve(
            stored,
            env_value("GEMINI_API_KEY"),
            env_value("GROQ_API_KEY"),
        ))
    }

    fn resolve(
        stored: StoredConfig,
        env_gemini_key: Option<String>,
        env_groq_key: Option<String>,
    ) -> Self {
        let default_provider = stored
            .default_provider
            .as_deref()
            .and_then(ReplyProvider::from_str)
            .unwrap_or(ReplyProvider::Gemini);

        Self {
            gemini_api_key: env_gemini_key.or(stored.gemini_api_key),
            groq_api_key: env_groq_key.or(stored.groq_api_key),
            default_provider,
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Ok(dir) = env::var("DESKREPLY_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = env_value("HOME").ok_or_else(|| {
        AppError::Configuration("HOME is not set; cannot locate the config directory".to_string())
    })?;
    Ok(PathBuf::from(home).join(".config").join("deskreply"))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reply_provider() {
        assert_eq!(ReplyProvider::from_str("gemini"), Some(ReplyProvider::Gemini));
        assert_eq!(ReplyProvider::from_str("GROQ"), Some(ReplyProvider::Groq));
        assert_eq!(ReplyProvider::from_str("openai"), None);
    }

    #[test]
    fn environment_keys_take_precedence() {
        let stored = StoredConfig {
            gemini_api_key: Some("stored-gemini".to_string()),
            groq_api_key: Some("stored-groq".to_string()),
            default_provider: None,
        };

        let config = AppConfig::resolve(stored, Some("env-gemini".to_string()), None);

        assert_eq!(config.gemini_api_key.as_deref(), Some("env-gemini"));
        assert_eq!(config.groq_api_key.as_deref(), Some("stored-groq"));
    }

    #[test]
    fn unknown_stored_provider_falls_back_to_gemini() {
        let stored = StoredConfig {
            gemini_api_key: None,
            groq_api_key: None,
            default_provider: Some("claude".to_string()),
        };

        let config = AppConfig::resolve(stored, None, None);

        assert_eq!(config.default_provider, ReplyProvider::Gemini);
    }
}
