//! Blurb CLI - Generate product descriptions and bullet points with an LLM.
//!
//! Blurb reads product titles from a spreadsheet, asks an OpenAI-compatible
//! model for marketing copy, splits each answer into a description plus ten
//! bullet slots, and writes a dated report.
//!
//! # Usage
//!
//! ```bash
//! # Process the configured input file
//! blurb run --user jkowal
//!
//! # Process a specific workbook into JSON Lines
//! blurb run products.xlsx --format jsonl
//!
//! # Check how a text is split into description and bullets
//! echo "..." | blurb split
//!
//! # View configuration
//! blurb config show
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Blurb - Generate product descriptions and bullet points with an LLM.
#[derive(Parser, Debug)]
#[command(name = "blurb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "BLURB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate copy for every record and write the report
    Run(cli::run::RunArgs),

    /// Split a text into description and bullet points
    Split(cli::split::SplitArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // API_KEY usually lives in .env next to the input file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // Loaded once. A broken file still leaves `config path` and `config init` usable.
    let loaded = cli::load_config(config_path);
    let fallback = blurb_core::Config::default();
    logging::init_from_config(
        loaded.as_ref().unwrap_or(&fallback),
        cli.verbose,
        cli.json_logs,
    );

    tracing::debug!("Blurb v{}", blurb_core::VERSION);

    match cli.command {
        Commands::Run(args) => cli::run::execute(args, loaded?).await,
        Commands::Split(args) => cli::split::execute(args, &loaded?),
        Commands::Config(args) => cli::config::execute(args, config_path, loaded),
    }
}
