//! Sub-configuration structs with defaults matching the production run.

use crate::output::ReportFormat;
use crate::query::ApiStyle;
use crate::report::StampStyle;
use crate::text::SentenceLanguage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input spreadsheet settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Spreadsheet read when no input is given on the command line
    pub path: PathBuf,

    /// Column holding the record identifier
    pub id_column: String,

    /// Column holding the product title
    pub title_column: String,

    /// Worksheet to read (first sheet when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("new_model_test.xlsx"),
            id_column: "ASIN".to_string(),
            title_column: "item_name.value".to_string(),
            sheet: None,
        }
    }
}

/// Prompt settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// System instruction sent ahead of every product title
    pub instruction: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            instruction: "You are an assistant that receives product titles and creates \
                          product description which are 6 sentences long and written in Polish."
                .to_string(),
        }
    }
}

/// Batching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Payloads per API request
    pub chunk_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { chunk_size: 1 }
    }
}

/// Generation parameters sent with every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Request shape: "chat" or "completion"
    pub api: ApiStyle,

    /// Model name. Falls back to the API style's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens generated per completion
    pub max_tokens: u32,

    /// Nucleus sampling mass (legacy completion API only)
    pub top_p: f32,

    /// Penalty for repeated tokens
    pub frequency_penalty: f32,

    /// Penalty for tokens already present
    pub presence_penalty: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api: ApiStyle::Chat,
            model: None,
            temperature: 0.2,
            max_tokens: 500,
            top_p: 1.0,
            frequency_penalty: 1.2,
            presence_penalty: 1.1,
        }
    }
}

impl GenerationConfig {
    /// Resolve the model name for the configured API style.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.api.default_model())
    }
}

/// Rate-limit retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay before the first retry in milliseconds
    pub base_delay_ms: u64,

    /// Upper bound for a single backoff delay in milliseconds
    pub max_delay_ms: u64,

    /// Max retries per batch (ignored when `unbounded` is set)
    pub max_retries: u32,

    /// Retry rate-limited requests forever
    pub unbounded: bool,

    /// Draw each sleep uniformly from [0, delay]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            max_delay_ms: 60_000,
            max_retries: 8,
            unbounded: false,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Retry ceiling, or `None` when retries are unbounded.
    pub fn ceiling(&self) -> Option<u32> {
        if self.unbounded {
            None
        } else {
            Some(self.max_retries)
        }
    }
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// LLM request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 60_000,
        }
    }
}

/// Text postprocessing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostprocessConfig {
    /// Language used for sentence splitting
    pub language: SentenceLanguage,

    /// Completions with fewer sentences get no description and no bullets
    pub min_sentences: usize,

    /// Leading sentences that form the description
    pub description_sentences: usize,

    /// Bullet point slots per row
    pub max_bullets: usize,

    /// Placeholder for a missing description or an empty bullet
    pub no_data: String,

    /// Placeholder for unused bullet slots
    pub null: String,

    /// Constant written to the vendor column of every row
    pub vendor_tag: String,
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        Self {
            language: SentenceLanguage::Polish,
            min_sentences: 6,
            description_sentences: 3,
            max_bullets: 10,
            no_data: "no data".to_string(),
            null: "NULL".to_string(),
            vendor_tag: "AmazonPl/NM5V9".to_string(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the report is written to
    pub dir: String,

    /// File name prefix
    pub prefix: String,

    /// Tag appended to the file name (usually the operator's login)
    pub user_tag: String,

    /// Timestamp style in the file name: "date" or "datetime"
    pub stamp: StampStyle,

    /// Report format: "xlsx", "json" or "jsonl"
    pub format: ReportFormat,

    /// Worksheet name (xlsx only)
    pub sheet_name: String,

    /// Text written to cell A1 above the table. Empty disables the header row.
    pub version_header: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            prefix: "FLEX_ATTRPDB".to_string(),
            user_tag: "user".to_string(),
            stamp: StampStyle::Date,
            format: ReportFormat::Xlsx,
            sheet_name: "LPD".to_string(),
            version_header: "version=1.0.0".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// LLM provider configurations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API configuration
    pub openai: OpenAiConfig,
}

/// OpenAI-compatible API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL (without the `/chat/completions` suffix)
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: "${API_KEY}".to_string(),
        }
    }
}
