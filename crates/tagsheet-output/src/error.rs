//! Error types for writing processed sheets.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// File system operation failed.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input path has no usable file name.
    #[error("cannot derive an output file name from {path}")]
    InvalidFileName { path: PathBuf },

    /// Record count differs from the table's row count.
    #[error("expected {expected} tag records, got {actual}")]
    RecordCountMismatch { expected: usize, actual: usize },

    #[error("failed to write {path}: {source}")]
    Delimited {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Sheet is larger than the workbook format allows.
    #[error("{what} {index} exceeds the workbook limit")]
    WorkbookLimit { what: &'static str, index: usize },

    /// Temporary file could not be moved into place.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
