//! Record store: tabular source loading and export.
//!
//! # Responsibility
//! - Read a semicolon-delimited table from a file or an embedded literal.
//! - Map source columns onto typed [`ProcessRecord`](crate::model::record::ProcessRecord) rows.
//! - Serialize a record subset back to the same delimited format.
//!
//! # Invariants
//! - Only unreadable sources and a missing `Número` column are fatal.
//! - A malformed row never aborts the load of the remaining rows.
//! - The loaded store is immutable; callers share it by reference.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dates;
mod record_store;
mod source;
pub mod table;

pub use record_store::{
    LoadReport, RecordStore, COLUMN_DATE, COLUMN_DESCRIPTION, COLUMN_ICONS, COLUMN_MARKER,
    COLUMN_NUMBER, COLUMN_PROCESS_TYPE, COLUMN_RESPONSIBLE, COLUMN_SUBJECT, STANDARD_COLUMNS,
};
pub use source::{CsvFileSource, InlineSource, RecordSource};

pub type LoadResult<T> = Result<T, DataLoadError>;

/// Fatal load failure surfaced to the caller.
#[derive(Debug)]
pub enum DataLoadError {
    /// Source could not be opened or read.
    Io {
        source_name: String,
        source: std::io::Error,
    },
    /// Source bytes are not valid UTF-8.
    Encoding { source_name: String },
    /// Source contains no header row.
    EmptySource { source_name: String },
    /// A column required for filtering is absent from the header.
    MissingColumn {
        source_name: String,
        column: &'static str,
    },
}

impl Display for DataLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                source_name,
                source,
            } => write!(f, "failed to read `{source_name}`: {source}"),
            Self::Encoding { source_name } => {
                write!(f, "`{source_name}` is not valid UTF-8 text")
            }
            Self::EmptySource { source_name } => {
                write!(f, "`{source_name}` has no header row")
            }
            Self::MissingColumn {
                source_name,
                column,
            } => write!(f, "`{source_name}` is missing required column `{column}`"),
        }
    }
}

impl Error for DataLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
