//! CLI enum types for the run command: report format and API style.

use blurb_core::{ApiStyle, ReportFormat};
use clap::ValueEnum;

/// Supported report formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Excel workbook
    Xlsx,
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ReportFormat::Xlsx,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Jsonl => ReportFormat::Jsonl,
        }
    }
}

/// Supported request shapes.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ApiArg {
    /// Chat Completions API
    Chat,
    /// Legacy Completions API
    Completion,
}

impl From<ApiArg> for ApiStyle {
    fn from(arg: ApiArg) -> Self {
        match arg {
            ApiArg::Chat => ApiStyle::Chat,
            ApiArg::Completion => ApiStyle::Completion,
        }
    }
}
