//! Blurb Core - batch product copy generation.
//!
//! Blurb reads product records from a spreadsheet, asks an OpenAI-compatible
//! model for marketing copy per record, splits each completion into a short
//! description plus bullet points, and writes a dated report.
//!
//! # Architecture
//!
//! ```text
//! Spreadsheet → Records → Queries → Batches → LLM (429 backoff) → Merge → Sentences → Report
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use blurb_core::{Blurb, Config};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> blurb_core::Result<()> {
//!     let config = Config::load()?;
//!     let blurb = Blurb::new(config, None)?;
//!
//!     let run = blurb.run(|done, total| println!("{done}/{total}")).await?;
//!     println!("Report: {:?}", run.report);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod batch;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod text;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{BlurbError, ConfigError, PipelineError, PipelineResult, Result};
pub use llm::{CompletionProvider, ProviderFactory};
pub use output::{OutputWriter, ReportFormat};
pub use pipeline::{ProcessOutput, ProductProcessor, RunOutput};
pub use query::ApiStyle;
pub use report::{ReportWriter, StampStyle};
pub use text::{Postprocessor, SentenceLanguage, SentenceSplitter};
pub use types::{Record, ResultRow, RunStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Blurb runner - the main entry point for a generation run.
pub struct Blurb {
    config: Config,
    processor: ProductProcessor,
}

impl Blurb {
    /// Create a runner backed by the configured OpenAI-compatible endpoint.
    ///
    /// `api_key` overrides the key configured under `[llm.openai]`.
    pub fn new(config: Config, api_key: Option<&str>) -> Result<Self> {
        let provider = ProviderFactory::create(&config, api_key)?;
        Ok(Self::with_provider(config, provider))
    }

    /// Create a runner that sends requests through `provider`.
    pub fn with_provider(config: Config, provider: Box<dyn CompletionProvider>) -> Self {
        tracing::debug!("Initializing Blurb v{}", VERSION);
        let processor = ProductProcessor::new(&config, provider);
        Self { config, processor }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process the configured input file and write the report.
    pub async fn run<F>(&self, on_batch: F) -> Result<RunOutput>
    where
        F: FnMut(usize, usize),
    {
        let input = self.config.input_path();
        Ok(self.processor.run(&input, on_batch).await?)
    }
}
