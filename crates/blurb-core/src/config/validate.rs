//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.id_column.trim().is_empty() || self.input.title_column.trim().is_empty() {
            return Err(invalid("input.id_column and input.title_column must be set"));
        }
        if self.batch.chunk_size == 0 {
            return Err(invalid("batch.chunk_size must be > 0"));
        }

        let generation = &self.generation;
        if generation.max_tokens == 0 {
            return Err(invalid("generation.max_tokens must be > 0"));
        }
        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(invalid("generation.temperature must be between 0.0 and 2.0"));
        }
        if !(-2.0..=2.0).contains(&generation.frequency_penalty) {
            return Err(invalid(
                "generation.frequency_penalty must be between -2.0 and 2.0",
            ));
        }
        if !(-2.0..=2.0).contains(&generation.presence_penalty) {
            return Err(invalid(
                "generation.presence_penalty must be between -2.0 and 2.0",
            ));
        }
        if generation.top_p <= 0.0 || generation.top_p > 1.0 {
            return Err(invalid("generation.top_p must be in (0.0, 1.0]"));
        }

        if self.retry.base_delay_ms == 0 {
            return Err(invalid("retry.base_delay_ms must be > 0"));
        }
        if self.retry.max_delay_ms < self.retry.base_delay_ms {
            return Err(invalid("retry.max_delay_ms must be >= retry.base_delay_ms"));
        }
        if self.limits.request_timeout_ms == 0 {
            return Err(invalid("limits.request_timeout_ms must be > 0"));
        }

        let post = &self.postprocess;
        if post.max_bullets == 0 {
            return Err(invalid("postprocess.max_bullets must be > 0"));
        }
        if post.description_sentences >= post.min_sentences {
            return Err(invalid(
                "postprocess.description_sentences must be < postprocess.min_sentences",
            ));
        }
        if post.no_data.is_empty() || post.null.is_empty() {
            return Err(invalid("postprocess.no_data and postprocess.null must be non-empty"));
        }

        if self.output.prefix.trim().is_empty() {
            return Err(invalid("output.prefix must be set"));
        }
        if self.output.sheet_name.is_empty() || self.output.sheet_name.chars().count() > 31 {
            return Err(invalid("output.sheet_name must be 1-31 characters"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let mut config = Config::default();
        config.batch.chunk_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn test_validate_rejects_invalid_temperature() {
        let mut config = Config::default();
        config.generation.temperature = 2.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));

        config.generation.temperature = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_penalty() {
        let mut config = Config::default();
        config.generation.presence_penalty = 3.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("presence_penalty"));
    }

    #[test]
    fn test_validate_rejects_max_delay_below_base() {
        let mut config = Config::default();
        config.retry.base_delay_ms = 5000;
        config.retry.max_delay_ms = 1000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_delay_ms"));
    }

    #[test]
    fn test_validate_rejects_description_longer_than_gate() {
        let mut config = Config::default();
        config.postprocess.description_sentences = 6;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("description_sentences"));
    }

    #[test]
    fn test_validate_rejects_long_sheet_name() {
        let mut config = Config::default();
        config.output.sheet_name = "x".repeat(32);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sheet_name"));
    }
}
