//! Processed sheet writers.
//!
//! Output is written to a temporary sibling of the target and renamed into
//! place, so a failed write never leaves a partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, info};

use tagsheet_ingest::SheetFormat;
use tagsheet_model::CellValue;

use crate::augment::AugmentedTable;
use crate::error::{OutputError, Result};

/// Prefix added to the input file name.
pub const PROCESSED_PREFIX: &str = "processed_";

/// `processed_` followed by the input's file name.
///
/// ```
/// use std::path::Path;
/// use tagsheet_output::processed_file_name;
///
/// assert_eq!(
///     processed_file_name(Path::new("/uploads/Q3 tags.xlsx")).unwrap(),
///     "processed_Q3 tags.xlsx"
/// );
/// ```
pub fn processed_file_name(input: &Path) -> Result<String> {
    input
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("{PROCESSED_PREFIX}{name}"))
        .ok_or_else(|| OutputError::InvalidFileName {
            path: input.to_path_buf(),
        })
}

/// Output path for `input`: next to it, or inside `output_dir` when given.
pub fn processed_path(input: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let name = processed_file_name(input)?;
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    Ok(dir.join(name))
}

/// Writes `table` to `path` in `format`.
pub fn write_table(table: &AugmentedTable, path: &Path, format: SheetFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension(format!("{}.tmp", format.extension()));
    let written = match format.delimiter() {
        Some(delimiter) => write_delimited(table, &temp_path, delimiter),
        None => write_workbook(table, &temp_path),
    };
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    debug!(temp = %temp_path.display(), "temporary output written");

    fs::rename(&temp_path, path).map_err(|e| OutputError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    info!(
        path = %path.display(),
        %format,
        rows = table.height(),
        columns = table.width(),
        "processed sheet written"
    );
    Ok(())
}

fn write_delimited(table: &AugmentedTable, path: &Path, delimiter: u8) -> Result<()> {
    let csv_error = |source| OutputError::Delimited {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(csv_error)?;
    writer.write_record(&table.header).map_err(csv_error)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|e| OutputError::Io {
        operation: "flush",
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_workbook(table: &AugmentedTable, path: &Path) -> Result<()> {
    let workbook_error = |source| OutputError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, label) in table.header.iter().enumerate() {
        worksheet
            .write_string_with_format(0, column_number(col)?, label, &bold)
            .map_err(workbook_error)?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_number(row_idx + 1)?;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, column_number(col)?, cell).map_err(workbook_error)?;
        }
    }

    workbook.save(path).map_err(workbook_error)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> std::result::Result<(), rust_xlsxwriter::XlsxError> {
    match cell {
        CellValue::Text(text) => worksheet.write_string(row, col, text).map(|_| ()),
        CellValue::Number(value) => worksheet.write_number(row, col, *value).map(|_| ()),
        CellValue::Bool(value) => worksheet.write_boolean(row, col, *value).map(|_| ()),
        CellValue::Missing => Ok(()),
    }
}

fn row_number(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| OutputError::WorkbookLimit { what: "row", index })
}

fn column_number(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| OutputError::WorkbookLimit {
        what: "column",
        index,
    })
}
