/// Column produced by Wireshark CSV exports for the protocol name
pub const PROTOCOL_COLUMN: &str = "Protocol";
/// Column carrying the sending device address
pub const SOURCE_COLUMN: &str = "Source";
/// Column carrying the packet length in bytes
pub const LENGTH_COLUMN: &str = "Length";
/// Column carrying the capture timestamp in seconds
pub const TIME_COLUMN: &str = "Time";

/// An immutable, column-labelled table decoded from one capture summary.
///
/// Cells are kept as raw text; numeric interpretation happens lazily via
/// `numeric_column` so that one unparseable cell never rejects a whole
/// upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell text for one column, row order preserved
    pub fn text_column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// Numeric view of one column, row order preserved.
    ///
    /// Cells that are empty or do not parse as a finite number come back
    /// as `None` and are skipped by the aggregation layer.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| {
                    row.get(idx)
                        .map(String::as_str)
                        .unwrap_or("")
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                })
                .collect(),
        )
    }
}
