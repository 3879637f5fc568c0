use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TerjemahError};
use crate::lang::LanguageId;

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Translation backend endpoint URL (LibreTranslate-style API)
    pub endpoint: String,
    /// Optional API key sent with each request
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum attempts for failed backend calls
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Which translator serves text spans
    #[serde(default)]
    pub mode: TranslationMode,
    /// Source language for classifier lookups; identified per span when unset
    #[serde(default)]
    pub source_language: Option<LanguageId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationMode {
    /// Classifier when trained models exist, external backend otherwise
    #[default]
    Auto,
    /// Always the external translation backend
    Remote,
    /// Always the locally trained classifier (demo mode, not real MT)
    Classifier,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// How translated text is written back into slide decks
    #[serde(default)]
    pub slide_text: SlideTextMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideTextMode {
    /// Replace the original run text with the translation
    #[default]
    Replace,
    /// Keep both, written as "original / translated"
    Bilingual,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TerjemahError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TerjemahError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TerjemahError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TerjemahError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.backend.endpoint, config.backend.endpoint);
        assert_eq!(parsed.translate.mode, TranslationMode::Auto);
        assert_eq!(parsed.document.slide_text, SlideTextMode::Replace);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("[backend]\nendpoint = \"http://mt.local\"\n").unwrap();
        assert_eq!(parsed.backend.endpoint, "http://mt.local");
        assert_eq!(parsed.backend.max_retries, 3);
        assert_eq!(parsed.translate.mode, TranslationMode::Auto);
    }

    #[test]
    fn test_invalid_source_language_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[translate]\nsource_language = \"English\"\n");
        assert!(result.is_err());
    }
}
