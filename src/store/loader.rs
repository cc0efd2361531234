use base64::{engine::general_purpose::STANDARD, Engine as _};
use csv::ReaderBuilder;
use log::debug;
use thiserror::Error;

use crate::store::dataset::Dataset;

/// Reasons an uploaded capture summary can be rejected.
///
/// A rejected upload never tears down the dashboard; callers report the
/// message and keep serving the previously stored dataset.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Upload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Upload transport is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Upload contents carry no comma-separated base64 payload")]
    MissingPayload,
    #[error("CSV input has no header row")]
    MissingHeader,
}

/// Decode raw CSV bytes into a [`Dataset`].
///
/// The first row is taken as the header. Header names are trimmed so that
/// exports with padded column titles still resolve. Rows must match the
/// header width; ragged input is rejected as a whole.
pub fn parse_csv(raw: &[u8]) -> Result<Dataset, DecodeError> {
    let text = std::str::from_utf8(raw)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(DecodeError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }

    debug!("decoded CSV: {} columns, {} rows", columns.len(), rows.len());
    Ok(Dataset::new(columns, rows))
}

/// Split browser-style upload contents (`data:text/csv;base64,<payload>`)
/// at the first comma and decode the base64 payload into raw bytes.
pub fn decode_upload_contents(contents: &str) -> Result<Vec<u8>, DecodeError> {
    let (_, payload) = contents
        .split_once(',')
        .ok_or(DecodeError::MissingPayload)?;
    Ok(STANDARD.decode(payload.trim())?)
}
