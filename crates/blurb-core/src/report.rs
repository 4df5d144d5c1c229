//! Report file naming and writing.
//!
//! Files are named `{prefix} {stamp}_{user}.{ext}`. The xlsx report holds one
//! sheet with an optional version string in A1 and the row table below it.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Workbook, XlsxError};
use serde::{Deserialize, Serialize};

use crate::config::OutputConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::output::{OutputWriter, ReportFormat};
use crate::types::ResultRow;

/// Timestamp style used in the report file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StampStyle {
    /// `MMDDYYYY`
    #[default]
    Date,
    /// `MMDDYYYY_HHMMSS`
    DateTime,
}

impl StampStyle {
    fn pattern(&self) -> &'static str {
        match self {
            StampStyle::Date => "%m%d%Y",
            StampStyle::DateTime => "%m%d%Y_%H%M%S",
        }
    }

    pub fn render(&self, now: NaiveDateTime) -> String {
        now.format(self.pattern()).to_string()
    }
}

/// Build the report file name for `now`.
pub fn report_file_name(
    prefix: &str,
    stamp: StampStyle,
    user: &str,
    format: ReportFormat,
    now: NaiveDateTime,
) -> String {
    format!(
        "{prefix} {}_{user}.{}",
        stamp.render(now),
        format.extension()
    )
}

/// Writes the final row set to a dated report file.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
    prefix: String,
    user_tag: String,
    stamp: StampStyle,
    format: ReportFormat,
    sheet_name: String,
    version_header: String,
}

impl ReportWriter {
    /// Create a writer for `config`, placing files in `dir`.
    pub fn new(config: &OutputConfig, dir: PathBuf) -> Self {
        Self {
            dir,
            prefix: config.prefix.clone(),
            user_tag: config.user_tag.clone(),
            stamp: config.stamp,
            format: config.format,
            sheet_name: config.sheet_name.clone(),
            version_header: config.version_header.clone(),
        }
    }

    /// Path the report gets when written at `now`.
    pub fn path_at(&self, now: NaiveDateTime) -> PathBuf {
        self.dir.join(report_file_name(
            &self.prefix,
            self.stamp,
            &self.user_tag,
            self.format,
            now,
        ))
    }

    /// Write `rows` with the current local time in the file name.
    pub fn write(&self, rows: &[ResultRow], bullet_slots: usize) -> PipelineResult<PathBuf> {
        self.write_at(rows, bullet_slots, chrono::Local::now().naive_local())
    }

    /// Write `rows` to the file named for `now`, overwriting any existing one.
    pub fn write_at(
        &self,
        rows: &[ResultRow],
        bullet_slots: usize,
        now: NaiveDateTime,
    ) -> PipelineResult<PathBuf> {
        let path = self.path_at(now);

        std::fs::create_dir_all(&self.dir).map_err(|e| PipelineError::Output {
            path: self.dir.clone(),
            message: format!("Failed to create output directory: {e}"),
        })?;

        let result = match self.format {
            ReportFormat::Xlsx => self
                .write_xlsx(&path, rows, bullet_slots)
                .map_err(|e| e.to_string()),
            ReportFormat::Json | ReportFormat::Jsonl => {
                self.write_json(&path, rows).map_err(|e| e.to_string())
            }
        };
        result.map_err(|message| PipelineError::Output {
            path: path.clone(),
            message,
        })?;

        tracing::info!("Wrote {} row(s) to {:?}", rows.len(), path);
        Ok(path)
    }

    fn write_xlsx(
        &self,
        path: &Path,
        rows: &[ResultRow],
        bullet_slots: usize,
    ) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let mut row_num = 0u32;
        if !self.version_header.is_empty() {
            worksheet.write_string(0, 0, &self.version_header)?;
            row_num = 1;
        }

        for (col, header) in ResultRow::headers(bullet_slots).iter().enumerate() {
            worksheet.write_string(row_num, col as u16, header)?;
        }

        for row in rows {
            row_num += 1;
            for (col, cell) in row.cells().into_iter().enumerate() {
                worksheet.write_string(row_num, col as u16, cell)?;
            }
        }

        workbook.save(path)
    }

    fn write_json(&self, path: &Path, rows: &[ResultRow]) -> std::io::Result<()> {
        let file = BufWriter::new(File::create(path)?);
        let mut writer = match self.format {
            ReportFormat::Jsonl => OutputWriter::jsonl(file),
            _ => OutputWriter::json(file, true),
        };
        writer.write_all(rows)?;
        writer.flush()
    }
}
