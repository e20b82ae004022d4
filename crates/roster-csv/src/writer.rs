//! Result reporter: writes the could-not-be-added set back to CSV.

use std::io;
use std::path::Path;

use roster_core::ParticipantRecord;
use tempfile::NamedTempFile;
use tracing::info;

use crate::columns::ColumnMap;
use crate::error::CsvError;

/// Write the missing-participant report.
///
/// Uses the same header names and field order as the input mapping, in the
/// missing set's (input) order. The report is staged in a temp file next to
/// the destination and moved into place on success, so the caller either
/// gets the whole report or an error and no file.
///
/// # Errors
///
/// [`CsvError::Write`] if staging, serialization, or the final rename fails.
pub fn write_missing_report(
    path: &Path,
    missing: &[ParticipantRecord],
    columns: &ColumnMap,
) -> Result<(), CsvError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = NamedTempFile::new_in(dir).map_err(CsvError::Write)?;

    let mut writer = csv::Writer::from_writer(staged.as_file());
    writer.write_record(columns.header()).map_err(to_io)?;
    for record in missing {
        writer
            .write_record([
                record.first_name.as_str(),
                record.last_name.as_str(),
                record.email.as_deref().unwrap_or_default(),
            ])
            .map_err(to_io)?;
    }
    writer.flush().map_err(CsvError::Write)?;
    drop(writer);

    staged.persist(path).map_err(|err| CsvError::Write(err.error))?;
    info!(count = missing.len(), path = %path.display(), "missing-player report written");
    Ok(())
}

fn to_io(err: csv::Error) -> CsvError {
    CsvError::Write(io::Error::other(err))
}
