use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvSourceError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: csv::Error },

    #[error("{path} is missing required columns: {missing}")]
    MissingColumns { path: String, missing: String },

    #[error("{path} row {row}: {source}")]
    Row { path: String, row: u64, source: csv::Error },
}

/// Read every row of a headed CSV file into `T`.
///
/// Header names are stripped of surrounding whitespace before use, and every
/// name in `required` must be present after trimming. A row that fails to
/// deserialize aborts the whole read.
pub fn read_rows<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, CsvSourceError> {
    let display = path.display().to_string();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|source| CsvSourceError::Read { path: display.clone(), source })?;

    let headers = reader
        .headers()
        .map_err(|source| CsvSourceError::Read { path: display.clone(), source })?;
    let headers = trim_headers(headers);

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .collect();
    if !missing.is_empty() {
        return Err(CsvSourceError::MissingColumns {
            path: display,
            missing: missing.join(", "),
        });
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // header line is row 1
        let row = idx as u64 + 2;
        let record = record.map_err(|source| CsvSourceError::Row { path: display.clone(), row, source })?;
        let value = record
            .deserialize(Some(&headers))
            .map_err(|source| CsvSourceError::Row { path: display.clone(), row, source })?;
        rows.push(value);
    }

    Ok(rows)
}

pub fn trim_headers(headers: &StringRecord) -> StringRecord {
    headers.iter().map(str::trim).collect()
}
