//! Error types for tag sheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a tag sheet.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Sheet file not found.
    #[error("sheet file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Extension is not one of the recognized sheet formats.
    #[error("unsupported file format '{extension}' for {path} (expected csv, tsv or xlsx)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Text encoding the readers cannot handle.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Failed to parse a delimited record.
    #[error("failed to parse {path}: {source}")]
    DelimitedParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Sheet has no non-blank rows.
    #[error("sheet is empty: {path}")]
    EmptySheet { path: PathBuf },
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
