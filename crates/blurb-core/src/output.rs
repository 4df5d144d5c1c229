//! Report formats and the JSON/JSONL row writer.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Report file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Excel workbook with a single sheet
    #[default]
    Xlsx,
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    Jsonl,
}

impl ReportFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Json => "json",
            Self::Jsonl => "jsonl",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Serializes rows as a JSON array or as JSON Lines.
pub struct OutputWriter<W: Write> {
    writer: W,
    lines: bool,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Writer producing one JSON array; `pretty` indents it.
    pub fn json(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            lines: false,
            pretty,
        }
    }

    /// Writer producing one compact JSON object per line.
    pub fn jsonl(writer: W) -> Self {
        Self {
            writer,
            lines: true,
            pretty: false,
        }
    }

    /// Write a single item followed by a newline.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Write every item: as one array, or one line each.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        if self.lines {
            for item in items {
                self.write(item)?;
            }
            return Ok(());
        }

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, items).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
