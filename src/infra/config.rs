// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::JudgeError;
use crate::infra::paths;
use crate::provider::GenerationSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Settings shared by every judge unless the judge overrides them.
    #[serde(default)]
    pub generation: GenerationDefaults,

    /// The panel. Empty means a single OpenAI judge named "default".
    #[serde(default)]
    pub judges: Vec<JudgeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationDefaults {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Openai,
    OpenaiCompat,
    Anthropic,
    Ollama,
}

impl ProviderKind {
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Openai | ProviderKind::OpenaiCompat => Some("OPENAI_API_KEY"),
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::Ollama => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProviderKind::Openai => "openai",
            ProviderKind::OpenaiCompat => "openai_compat",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Ollama => "ollama",
        };
        f.write_str(s)
    }
}

/// One `[[judges]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    pub name: String,
    #[serde(default)]
    pub provider: ProviderKind,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system: Option<String>,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
}

impl JudgeConfig {
    pub fn new(name: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            name: name.into(),
            provider,
            model: None,
            temperature: None,
            max_tokens: None,
            system: None,
            base_url: None,
            api_key_env: None,
        }
    }

    /// Judge overrides layered over the shared `[generation]` defaults.
    pub fn settings(&self, defaults: &GenerationDefaults) -> GenerationSettings {
        GenerationSettings {
            model: self.model.clone().or_else(|| defaults.model.clone()),
            temperature: self.temperature.or(defaults.temperature),
            max_tokens: self.max_tokens.or(defaults.max_tokens),
            system: self.system.clone().or_else(|| defaults.system.clone()),
            extra: Default::default(),
        }
    }

    /// Environment variable holding this judge's API key, if it needs one.
    pub fn api_key_env(&self) -> Option<String> {
        self.api_key_env
            .clone()
            .or_else(|| self.provider.default_api_key_env().map(String::from))
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), JudgeError> {
        let mut seen = std::collections::HashSet::new();
        for judge in &self.judges {
            if judge.name.trim().is_empty() {
                return Err(JudgeError::Config("judge name must not be empty".into()));
            }
            if !seen.insert(judge.name.as_str()) {
                return Err(JudgeError::Config(format!(
                    "duplicate judge name '{}'",
                    judge.name
                )));
            }
            if judge.provider == ProviderKind::OpenaiCompat && judge.base_url.is_none() {
                return Err(JudgeError::Config(format!(
                    "judge '{}' uses openai_compat but has no base_url",
                    judge.name
                )));
            }
        }
        Ok(())
    }

    /// The configured panel, or the single default judge.
    pub fn panel(&self) -> Vec<JudgeConfig> {
        if self.judges.is_empty() {
            vec![JudgeConfig::new("default", ProviderKind::Openai)]
        } else {
            self.judges.clone()
        }
    }
}
