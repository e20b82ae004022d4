//! # Roster CSV Boundary
//!
//! Tabular input and output for roster reconciliation: reads the intended
//! participant list from a headered CSV file into canonical
//! [`ParticipantRecord`]s, and writes the could-not-be-added report back out
//! in the same columnar shape.
//!
//! [`ParticipantRecord`]: roster_core::ParticipantRecord

pub mod columns;
pub mod error;
pub mod reader;
pub mod writer;

pub use columns::ColumnMap;
pub use error::CsvError;
pub use reader::read_participants;
pub use writer::write_missing_report;
