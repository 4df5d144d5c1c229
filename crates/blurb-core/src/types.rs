//! Core data types for the Blurb pipeline.
//!
//! A [`Record`] is one input row; a [`ResultRow`] is one output row in the
//! fixed flex-attribute schema.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Output column holding the record identifier.
pub const ID_COLUMN: &str = "ASIN";

/// Output column holding the vendor tag.
pub const VENDOR_COLUMN: &str = "sc_vendor_name";

/// Output column holding the generated description.
pub const DESCRIPTION_COLUMN: &str = "rtip_product_description.value";

/// Output column name for the 1-based bullet slot `n`.
pub fn bullet_column(n: usize) -> String {
    format!("bullet_point#{n}.value")
}

/// One product read from the input spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique key (the ASIN column)
    pub identifier: String,

    /// Product title sent to the model
    pub title: String,
}

impl Record {
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
        }
    }
}

/// One output row: description plus a fixed number of bullet slots.
///
/// Serializes as a flat map keyed by the report column names, so JSON output
/// carries the same keys as the spreadsheet header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Record identifier
    pub identifier: String,

    /// Constant vendor tag
    pub vendor: String,

    /// First sentences of the completion, or the "no data" sentinel
    pub description: String,

    /// Bullet slot values; unused slots hold the "NULL" sentinel
    pub bullets: Vec<String>,
}

impl ResultRow {
    /// Column headers for a table of rows with `bullet_slots` bullet columns.
    pub fn headers(bullet_slots: usize) -> Vec<String> {
        let mut headers = vec![
            ID_COLUMN.to_string(),
            VENDOR_COLUMN.to_string(),
            DESCRIPTION_COLUMN.to_string(),
        ];
        headers.extend((1..=bullet_slots).map(bullet_column));
        headers
    }

    /// Cell values in header order.
    pub fn cells(&self) -> Vec<&str> {
        let mut cells = vec![
            self.identifier.as_str(),
            self.vendor.as_str(),
            self.description.as_str(),
        ];
        cells.extend(self.bullets.iter().map(String::as_str));
        cells
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.bullets.len()))?;
        map.serialize_entry(ID_COLUMN, &self.identifier)?;
        map.serialize_entry(VENDOR_COLUMN, &self.vendor)?;
        map.serialize_entry(DESCRIPTION_COLUMN, &self.description)?;
        for (i, bullet) in self.bullets.iter().enumerate() {
            map.serialize_entry(&bullet_column(i + 1), bullet)?;
        }
        map.end()
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Records read from the input
    pub records: usize,

    /// API requests issued (one per batch, excluding retries)
    pub batches: usize,

    /// Completions returned by the API
    pub completions: usize,

    /// Rows that received a real description
    pub described: usize,

    /// Requests retried after a rate-limit response
    pub rate_limited: u32,

    /// Total time slept in backoff, in milliseconds
    pub backoff_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ResultRow {
        ResultRow {
            identifier: "B001".to_string(),
            vendor: "AmazonPl/NM5V9".to_string(),
            description: "Opis.".to_string(),
            bullets: vec!["Pierwszy".to_string(), "NULL".to_string()],
        }
    }

    #[test]
    fn test_headers_order() {
        let headers = ResultRow::headers(2);
        assert_eq!(
            headers,
            vec![
                "ASIN",
                "sc_vendor_name",
                "rtip_product_description.value",
                "bullet_point#1.value",
                "bullet_point#2.value",
            ]
        );
    }

    #[test]
    fn test_cells_follow_headers() {
        let row = sample_row();
        assert_eq!(
            row.cells(),
            vec!["B001", "AmazonPl/NM5V9", "Opis.", "Pierwszy", "NULL"]
        );
    }

    #[test]
    fn test_serialize_uses_column_names() {
        let json = serde_json::to_value(sample_row()).unwrap();
        assert_eq!(json["ASIN"], "B001");
        assert_eq!(json["rtip_product_description.value"], "Opis.");
        assert_eq!(json["bullet_point#1.value"], "Pierwszy");
        assert_eq!(json["bullet_point#2.value"], "NULL");
    }
}
