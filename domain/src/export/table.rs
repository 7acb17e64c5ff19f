//! Markdown table extraction and CSV conversion.
//!
//! Generated test cases arrive as a markdown pipe-table inside the
//! assistant's reply. [`extract_table`] pulls the first such table out as
//! rows of cells; [`table_to_csv`] serializes the rows with proper CSV
//! quoting.

use crate::core::error::DomainError;

/// Extract the first markdown pipe-table from `text`.
///
/// The table is located by its separator row (`| --- | --- |`); the
/// header row immediately above it and every following `|`-prefixed row
/// are captured. The first non-table line ends the scan. Returns rows of
/// trimmed cell values, or `None` when no table is present.
pub fn extract_table(text: &str) -> Option<Vec<Vec<String>>> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let separator = lines
        .iter()
        .position(|line| line.starts_with('|') && line.contains("---"))?;

    let mut rows = Vec::new();

    // Header row sits directly above the separator.
    if separator > 0 && lines[separator - 1].starts_with('|') {
        rows.push(split_row(lines[separator - 1]));
    }

    for line in &lines[separator + 1..] {
        if !line.starts_with('|') {
            break;
        }
        rows.push(split_row(line));
    }

    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}

/// Split one `| a | b |` row into trimmed cell values.
fn split_row(line: &str) -> Vec<String> {
    let inner = line.trim_matches('|');
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Serialize table rows to a CSV string.
pub fn table_to_csv(rows: &[Vec<String>]) -> Result<String, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| DomainError::CsvError(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DomainError::CsvError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DomainError::CsvError(e.to_string()))
}
