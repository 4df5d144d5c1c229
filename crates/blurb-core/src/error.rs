//! Error types for the Blurb pipeline.
//!
//! Errors are organized by stage so a failed run says where it stopped and
//! with what input (file paths, column names, HTTP status).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Blurb operations.
#[derive(Error, Debug)]
pub enum BlurbError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input spreadsheet could not be opened or read
    #[error("Input error for {path}: {message}")]
    Input { path: PathBuf, message: String },

    /// Required columns are absent from the input header row
    #[error("Missing columns in {path}: {}", missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    /// The LLM API call failed
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        /// HTTP status code, when the failure came from an HTTP response
        status_code: Option<u16>,
    },

    /// Operation timed out
    #[error("Timeout in {stage} stage after {timeout_ms}ms")]
    Timeout { stage: String, timeout_ms: u64 },

    /// Writing the report failed
    #[error("Output error for {path}: {message}")]
    Output { path: PathBuf, message: String },
}

/// Convenience type alias for Blurb results.
pub type Result<T> = std::result::Result<T, BlurbError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
