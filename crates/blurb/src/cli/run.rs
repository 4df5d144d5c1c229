//! The `blurb run` command: the full generation pipeline.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use blurb_core::{Blurb, Config, RunOutput};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use super::types::{ApiArg, FormatArg};

/// Arguments for the `run` command.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Input spreadsheet (defaults to `input.path` from config)
    pub input: Option<PathBuf>,

    /// Tag appended to the report file name
    #[arg(short, long, env = "BLURB_USER")]
    pub user: Option<String>,

    /// Directory the report is written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Request shape: chat or legacy completion
    #[arg(long, value_enum)]
    pub api: Option<ApiArg>,

    /// Model name (defaults per API style)
    #[arg(long)]
    pub model: Option<String>,

    /// Records per API request
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Omit the version string above the table
    #[arg(long)]
    pub no_header: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut Config) {
        if let Some(ref input) = self.input {
            config.input.path = input.clone();
        }
        if let Some(ref user) = self.user {
            config.output.user_tag = user.clone();
        }
        if let Some(ref dir) = self.output_dir {
            config.output.dir = dir.to_string_lossy().into_owned();
        }
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if let Some(api) = self.api {
            config.generation.api = api.into();
        }
        if let Some(ref model) = self.model {
            config.generation.model = Some(model.clone());
        }
        if let Some(chunk_size) = self.chunk_size {
            config.batch.chunk_size = chunk_size;
        }
        if self.no_header {
            config.output.version_header.clear();
        }
    }
}

/// Execute the run command.
pub async fn execute(args: RunArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.validate()?;

    let input = config.input_path();
    if !input.is_file() {
        anyhow::bail!(
            "Input file does not exist: {:?}\n\n  Hint: Pass the workbook path or set input.path in the config.",
            input
        );
    }
    tracing::info!(
        "Generating with {} ({} API), {} record(s) per request",
        config.generation.model(),
        config.generation.api,
        config.batch.chunk_size
    );

    let blurb = Blurb::new(config, None)?;

    let progress = create_progress_bar();
    let start = Instant::now();
    let result = blurb
        .run(|done, total| {
            progress.set_length(total as u64);
            progress.set_position(done as u64);
        })
        .await;
    progress.finish_and_clear();

    let run = result?;
    print_summary(&run, start.elapsed());
    Ok(())
}

/// Create a progress bar over API batches.
fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%)",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb
}

fn print_summary(run: &RunOutput, elapsed: Duration) {
    let stats = &run.stats;

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Records:      {:>8}", stats.records);
    eprintln!("    Batches:      {:>8}", stats.batches);
    eprintln!("    Described:    {:>8}", stats.described);
    if stats.records > stats.described {
        eprintln!("    No data:      {:>8}", stats.records - stats.described);
    }
    if stats.rate_limited > 0 {
        eprintln!("    Rate limited: {:>8}", stats.rate_limited);
        eprintln!("    Backoff:      {:>7.1}s", stats.backoff_ms as f64 / 1000.0);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Report:       {}", run.report.display());
    eprintln!("  ====================================");
}
