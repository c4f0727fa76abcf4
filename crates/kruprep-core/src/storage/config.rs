//! TOML configuration for the quiz and the AI generator.
//!
//! Lives at `data_dir()/config.toml`. Every field has a default, so a
//! missing or partial file always yields a working configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::question::DEFAULT_QUESTION_COUNTS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Quiz setup options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Question-count choices offered on the setup screen.
    #[serde(default = "default_question_counts")]
    pub question_counts: Vec<usize>,
    /// Countdown budget per drawn question.
    #[serde(default = "default_seconds_per_question")]
    pub seconds_per_question: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_counts: default_question_counts(),
            seconds_per_question: default_seconds_per_question(),
        }
    }
}

/// Gemini generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Explicit API key; when unset the `GEMINI_API_KEY` environment
    /// variable is consulted instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Questions requested per batch in the review flow.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            batch_size: default_batch_size(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeneratorConfig {
    /// The key the generator will use: the explicit field wins, then the
    /// environment, then `None`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()))
    }
}

fn default_question_counts() -> Vec<usize> {
    DEFAULT_QUESTION_COUNTS.to_vec()
}

fn default_seconds_per_question() -> u64 {
    60
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-04-17".to_string()
}

fn default_batch_size() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Default config file location.
    pub fn path() -> PathBuf {
        super::data_dir().join("config.toml")
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Loads the config, falling back to defaults. A missing file is the
    /// normal first-run case; anything else is logged before defaulting.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                log::warn!("could not load config, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_constants() {
        let config = Config::default();
        assert_eq!(config.quiz.question_counts, vec![10, 20, 30]);
        assert_eq!(config.quiz.seconds_per_question, 60);
        assert_eq!(config.generator.model, "gemini-2.5-flash-preview-04-17");
        assert_eq!(config.generator.batch_size, 10);
        assert!(config.generator.api_key.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[quiz]\nseconds_per_question = 90\n").unwrap();
        assert_eq!(config.quiz.seconds_per_question, 90);
        assert_eq!(config.quiz.question_counts, vec![10, 20, 30]);
        assert_eq!(config.generator.batch_size, 10);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.generator.batch_size = 5;
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn explicit_api_key_wins_over_environment() {
        let config = GeneratorConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn empty_api_key_field_counts_as_unset() {
        let config = GeneratorConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        // Falls through to the environment, which may or may not be set;
        // the explicit empty string must never be returned.
        assert_ne!(config.resolve_api_key().as_deref(), Some(""));
    }
}
