//! Input normalizer: headered CSV file to canonical participant records.

use std::path::Path;

use roster_core::ParticipantRecord;
use tracing::debug;

use crate::columns::ColumnMap;
use crate::error::CsvError;

/// Read and normalize the intended-participant list.
///
/// The name columns are required; a missing header is an error, and a row
/// without both names aborts the whole read (no partial intake). The email
/// column may be absent entirely, in which case every row is guest-only.
///
/// # Errors
///
/// [`CsvError::MissingColumn`] if a required header is absent,
/// [`CsvError::MalformedRow`] for the first row without usable names, and
/// [`CsvError::Read`] for underlying I/O or parse failures.
pub fn read_participants(
    path: &Path,
    columns: &ColumnMap,
) -> Result<Vec<ParticipantRecord>, CsvError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let first_idx = position(&columns.first_name).ok_or_else(|| CsvError::MissingColumn {
        name: columns.first_name.clone(),
    })?;
    let last_idx = position(&columns.last_name).ok_or_else(|| CsvError::MissingColumn {
        name: columns.last_name.clone(),
    })?;
    let email_idx = position(&columns.email);
    if email_idx.is_none() {
        debug!(
            column = %columns.email,
            "input has no email column; all rows will be treated as guests"
        );
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1, so data starts at line 2.
        let line = row.position().map_or(index as u64 + 2, |p| p.line());

        let first_name = row.get(first_idx).unwrap_or_default();
        let last_name = row.get(last_idx).unwrap_or_default();
        let email = email_idx.and_then(|idx| row.get(idx));

        let record = ParticipantRecord::from_parts(first_name, last_name, email)
            .map_err(|source| CsvError::MalformedRow { line, source })?;
        records.push(record);
    }

    debug!(count = records.len(), "normalized participant records");
    Ok(records)
}
