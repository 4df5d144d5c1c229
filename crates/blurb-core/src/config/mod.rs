//! Configuration management for Blurb.
//!
//! Configuration is loaded from `~/.blurb/config.toml` (or the platform config
//! directory) with defaults that reproduce the production run.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Blurb.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input spreadsheet settings
    pub input: InputConfig,

    /// Prompt settings
    pub prompt: PromptConfig,

    /// Batching settings
    pub batch: BatchConfig,

    /// Generation parameters
    pub generation: GenerationConfig,

    /// Rate-limit retry settings
    pub retry: RetryConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Text postprocessing settings
    pub postprocess: PostprocessConfig,

    /// Report output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// LLM provider settings
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.blurb.blurb/config.toml
    /// - Linux: ~/.config/blurb/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\blurb\config\config.toml
    ///
    /// Falls back to ~/.blurb/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "blurb", "blurb")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".blurb").join("config.toml")
            })
    }

    /// Get the resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.output.dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Get the resolved default input path (with ~ expansion).
    pub fn input_path(&self) -> PathBuf {
        let path_str = self.input.path.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ApiStyle;
    use crate::report::StampStyle;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.id_column, "ASIN");
        assert_eq!(config.input.title_column, "item_name.value");
        assert_eq!(config.batch.chunk_size, 1);
        assert_eq!(config.generation.model(), "gpt-3.5-turbo");
        assert_eq!(config.postprocess.max_bullets, 10);
        assert_eq!(config.output.version_header, "version=1.0.0");
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[input]"));
        assert!(toml.contains("[generation]"));
        assert!(toml.contains("${API_KEY}"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [generation]
            api = "completion"

            [output]
            stamp = "datetime"
            user_tag = "krolikma"
            "#,
        )
        .unwrap();
        assert_eq!(config.generation.api, ApiStyle::Completion);
        assert_eq!(config.generation.model(), "gpt-3.5-turbo-instruct");
        assert_eq!(config.generation.max_tokens, 500);
        assert_eq!(config.output.stamp, StampStyle::DateTime);
        assert_eq!(config.output.user_tag, "krolikma");
        assert_eq!(config.output.prefix, "FLEX_ATTRPDB");
    }

    #[test]
    fn test_model_override_wins() {
        let mut config = Config::default();
        config.generation.model = Some("gpt-4o-mini".to_string());
        assert_eq!(config.generation.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_retry_ceiling() {
        let mut config = Config::default();
        assert_eq!(config.retry.ceiling(), Some(8));
        config.retry.unbounded = true;
        assert_eq!(config.retry.ceiling(), None);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let err = Config::from_toml("[batch]\nchunk_size = 0\n").unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[input]\nid_column = \"SKU\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.input.id_column, "SKU");
    }
}
