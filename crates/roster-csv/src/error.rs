//! Errors for the CSV boundary.

use roster_core::ReconcileError;
use thiserror::Error;

/// CSV boundary errors. All of these are fatal for the run: malformed input
/// aborts before any registration, and a failed report write must not look
/// like success.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to read input file: {0}")]
    Read(#[from] csv::Error),

    #[error("input file has no {name:?} column - is the column mapping set correctly?")]
    MissingColumn { name: String },

    #[error("row {line} is missing required participant data")]
    MalformedRow {
        line: u64,
        #[source]
        source: ReconcileError,
    },

    #[error("failed to write report")]
    Write(#[source] std::io::Error),
}
