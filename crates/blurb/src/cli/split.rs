//! The `blurb split` command: run only the text postprocessor.

use std::io::{self, Read};
use std::path::PathBuf;

use blurb_core::{Config, OutputWriter, Postprocessor, ResultRow, SentenceSplitter};
use clap::Args;

/// Arguments for the `split` command.
#[derive(Args, Debug, Default)]
pub struct SplitArgs {
    /// Text file to split (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Identifier written to the row
    #[arg(long, default_value = "-")]
    pub id: String,

    /// Print the detected sentences instead of the row
    #[arg(long)]
    pub sentences: bool,
}

/// Execute the split command.
pub fn execute(args: SplitArgs, config: &Config) -> anyhow::Result<()> {
    let text = match args.file {
        Some(ref path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let stdout = io::stdout();
    let mut writer = OutputWriter::json(stdout.lock(), true);
    if args.sentences {
        let splitter = SentenceSplitter::new(config.postprocess.language);
        writer.write(&splitter.split(&text))?;
    } else {
        writer.write(&split_row(&Postprocessor::new(&config.postprocess), &args.id, &text))?;
    }
    writer.flush()?;
    Ok(())
}

fn split_row(postprocessor: &Postprocessor, id: &str, text: &str) -> ResultRow {
    let row = postprocessor.process(id, text);
    if !postprocessor.is_described(&row) {
        tracing::warn!("Text is too short for a description; row carries no data");
    }
    row
}
