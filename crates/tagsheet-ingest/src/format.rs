//! Recognized sheet formats.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// File formats a tag sheet may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl SheetFormat {
    pub const ALL: [SheetFormat; 3] = [Self::Csv, Self::Tsv, Self::Xlsx];

    /// Determines the format from the file extension, case-insensitively.
    ///
    /// ```
    /// use std::path::Path;
    /// use tagsheet_ingest::SheetFormat;
    ///
    /// assert_eq!(SheetFormat::from_path(Path::new("Tags.XLSX")).ok(), Some(SheetFormat::Xlsx));
    /// assert!(SheetFormat::from_path(Path::new("tags.xls")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
            .ok_or_else(|| IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Xlsx => "xlsx",
        }
    }

    /// Field delimiter for delimited text formats.
    pub const fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Xlsx => None,
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_extension_is_unsupported() {
        let err = SheetFormat::from_path(Path::new("tags")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat { ref extension, .. } if extension.is_empty()
        ));
    }

    #[test]
    fn delimiters() {
        assert_eq!(SheetFormat::Csv.delimiter(), Some(b','));
        assert_eq!(SheetFormat::Tsv.delimiter(), Some(b'\t'));
        assert_eq!(SheetFormat::Xlsx.delimiter(), None);
    }
}
