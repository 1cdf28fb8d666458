//! Failure taxonomy of a sheet processing run.

use std::path::PathBuf;

use thiserror::Error;

use tagsheet_ingest::IngestError;
use tagsheet_map::ColumnResolutionError;
use tagsheet_output::OutputError;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// Input extension is not a recognized sheet format. Nothing is read.
    #[error("unsupported file format '{extension}' for {path} (expected csv, tsv or xlsx)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Placement ID or tag column could not be located. Nothing is written.
    #[error(transparent)]
    ColumnResolution(#[from] ColumnResolutionError),

    /// Any other read or write failure.
    #[error("{0}")]
    Unexpected(String),
}

impl From<IngestError> for ProcessError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnsupportedFormat { path, extension } => {
                Self::UnsupportedFormat { path, extension }
            }
            other => Self::Unexpected(other.to_string()),
        }
    }
}

impl From<OutputError> for ProcessError {
    fn from(err: OutputError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagsheet_model::ColumnRole;

    #[test]
    fn unsupported_format_keeps_its_kind() {
        let err = ProcessError::from(IngestError::UnsupportedFormat {
            path: PathBuf::from("tags.pdf"),
            extension: "pdf".to_string(),
        });
        assert!(matches!(err, ProcessError::UnsupportedFormat { .. }));
    }

    #[test]
    fn other_ingest_failures_are_unexpected() {
        let err = ProcessError::from(IngestError::EmptySheet {
            path: PathBuf::from("tags.csv"),
        });
        assert!(matches!(err, ProcessError::Unexpected(_)));
        assert!(err.to_string().contains("tags.csv"));
    }

    #[test]
    fn resolution_message_is_passed_through() {
        let err = ProcessError::from(ColumnResolutionError::MissingRoles {
            missing: vec![ColumnRole::Tag],
        });
        assert!(err.to_string().contains("tag"));
    }
}
