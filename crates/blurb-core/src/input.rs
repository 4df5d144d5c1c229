//! Record loading from spreadsheet input.
//!
//! Reads the header row, checks that the identifier and title columns exist,
//! and yields one [`Record`] per data row in sheet order.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};

use crate::config::InputConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::Record;

/// Loads [`Record`]s from xlsx/xls/xlsb/ods workbooks.
pub struct RecordLoader {
    id_column: String,
    title_column: String,
    sheet: Option<String>,
}

impl RecordLoader {
    /// Create a loader for the configured columns and sheet.
    pub fn new(config: &InputConfig) -> Self {
        Self {
            id_column: config.id_column.clone(),
            title_column: config.title_column.clone(),
            sheet: config.sheet.clone(),
        }
    }

    /// Read all records from the workbook at `path`.
    pub fn load(&self, path: &Path) -> PipelineResult<Vec<Record>> {
        let mut workbook = open_workbook_auto(path).map_err(|e| input_error(path, e))?;

        let sheet = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| input_error(path, "workbook has no worksheets"))?,
        };
        tracing::debug!("Reading sheet {sheet:?} from {path:?}");

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| input_error(path, format!("sheet {sheet:?}: {e}")))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
        self.from_rows(path, rows)
    }

    /// Build records from already-decoded rows. The first row is the header.
    ///
    /// `path` is only used for error messages.
    pub fn from_rows<I>(&self, path: &Path, rows: I) -> PipelineResult<Vec<Record>>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut rows = rows.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| input_error(path, "no header row"))?;

        let position = |name: &str| header.iter().position(|h| h.trim() == name);
        let id_idx = position(&self.id_column);
        let title_idx = position(&self.title_column);

        let (id_idx, title_idx) = match (id_idx, title_idx) {
            (Some(id), Some(title)) => (id, title),
            _ => {
                let mut missing = Vec::new();
                if id_idx.is_none() {
                    missing.push(self.id_column.clone());
                }
                if title_idx.is_none() {
                    missing.push(self.title_column.clone());
                }
                return Err(PipelineError::MissingColumns {
                    path: path.to_path_buf(),
                    missing,
                });
            }
        };

        let mut records = Vec::new();
        for row in rows {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let cell = |idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or_default();
            records.push(Record::new(cell(id_idx), cell(title_idx)));
        }

        tracing::info!("Loaded {} record(s) from {:?}", records.len(), path);
        Ok(records)
    }
}

/// Render a spreadsheet cell as text.
///
/// Integral floats lose their fractional part, so a numeric identifier cell
/// `1234.0` reads as `1234`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn input_error(path: &Path, message: impl std::fmt::Display) -> PipelineError {
    PipelineError::Input {
        path: PathBuf::from(path),
        message: message.to_string(),
    }
}
