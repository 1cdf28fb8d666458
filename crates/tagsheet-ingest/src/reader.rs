//! Sheet readers.
//!
//! Every format is read into plain rows of [`CellValue`] first; header-row
//! handling is shared and applied afterwards.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::{debug, warn};

use tagsheet_model::{CellValue, RawTable};

use crate::error::{IngestError, Result};
use crate::format::SheetFormat;
use crate::header::HeaderMode;

/// Reads a tag sheet, picking the reader from the file extension.
///
/// Fully blank rows are dropped. The first remaining row becomes the header
/// when `header_mode` says so.
pub fn read_sheet(path: &Path, header_mode: HeaderMode) -> Result<RawTable> {
    let format = SheetFormat::from_path(path)?;
    let rows = read_rows(path, format)?;
    let Some(first) = rows.first() else {
        return Err(IngestError::EmptySheet {
            path: path.to_path_buf(),
        });
    };
    let has_header_row = header_mode.is_header(first);
    debug!(
        path = %path.display(),
        %format,
        rows = rows.len(),
        has_header_row,
        "sheet loaded"
    );
    let table = RawTable::from_rows(rows, has_header_row);
    if table.width() > 500 {
        warn!(
            path = %path.display(),
            columns = table.width(),
            "sheet has more than 500 columns"
        );
    }
    Ok(table)
}

/// Reads the raw, non-blank rows of a sheet in the given format.
pub fn read_rows(path: &Path, format: SheetFormat) -> Result<Vec<Vec<CellValue>>> {
    let rows = match format.delimiter() {
        Some(delimiter) => read_delimited_rows(path, delimiter)?,
        None => read_workbook_rows(path)?,
    };
    Ok(rows
        .into_iter()
        .filter(|row| !row.iter().all(CellValue::is_missing))
        .collect())
}

fn normalize_cell(raw: &str) -> CellValue {
    CellValue::text(raw.trim().trim_matches('\u{feff}'))
}

/// Rejects UTF-16 input, which the delimited reader cannot decode.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|e| IngestError::from_io(path, e))?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

fn read_delimited_rows(path: &Path, delimiter: u8) -> Result<Vec<Vec<CellValue>>> {
    validate_encoding(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| delimited_error(path, source))?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| delimited_error(path, source))?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(rows)
}

fn delimited_error(path: &Path, source: csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io) = source.kind()
        && io.kind() == std::io::ErrorKind::NotFound
    {
        return IngestError::FileNotFound {
            path: path.to_path_buf(),
        };
    }
    IngestError::DelimitedParse {
        path: path.to_path_buf(),
        source,
    }
}

fn read_workbook_rows(path: &Path) -> Result<Vec<Vec<CellValue>>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(workbook_error("workbook has no worksheets".to_string()));
    };
    let range = range.map_err(|e| workbook_error(e.to_string()))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect())
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            normalize_cell(text)
        }
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => CellValue::Number(value.as_f64()),
        Data::Error(error) => CellValue::text(error.to_string()),
    }
}
