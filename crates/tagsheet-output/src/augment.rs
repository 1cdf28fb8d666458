//! Augmented table construction.

use tagsheet_map::ColumnResolution;
use tagsheet_model::{CellValue, ColumnRole, RawTable, TagRecord};

use crate::error::{OutputError, Result};

pub const PLACEMENT_ID_MAPPING_COLUMN: &str = "Placement ID Mapping";
pub const CLEANED_TAG_COLUMN: &str = "CACHEBUSTED Tag";
pub const NOTES_COLUMN: &str = "Notes";

/// Header labels for the resolved columns of a headerless sheet.
const PLACEMENT_ID_LABEL: &str = "placement_id";
const TAG_LABEL: &str = "tag";

/// The original table followed by the placement ID mapping, cleaned tag and
/// notes columns.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl AugmentedTable {
    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Appends the three output columns to every row of `table`.
///
/// `records` must hold one record per table row, in row order. The mapping
/// column copies the resolved placement ID cell verbatim.
pub fn augment(
    table: &RawTable,
    resolution: &ColumnResolution,
    records: &[TagRecord],
) -> Result<AugmentedTable> {
    if records.len() != table.height() {
        return Err(OutputError::RecordCountMismatch {
            expected: table.height(),
            actual: records.len(),
        });
    }

    let mut header = original_header(table, resolution);
    header.extend(
        [PLACEMENT_ID_MAPPING_COLUMN, CLEANED_TAG_COLUMN, NOTES_COLUMN].map(String::from),
    );

    let rows = table
        .rows()
        .iter()
        .zip(records)
        .map(|(row, record)| {
            let mut cells = Vec::with_capacity(row.len() + 3);
            cells.extend(row.iter().cloned());
            cells.push(
                row.get(resolution.placement_id.index)
                    .cloned()
                    .unwrap_or(CellValue::Missing),
            );
            cells.push(CellValue::text(record.cleaned_tag.as_str()));
            cells.push(CellValue::text(record.notes.to_string()));
            cells
        })
        .collect();

    Ok(AugmentedTable { header, rows })
}

fn original_header(table: &RawTable, resolution: &ColumnResolution) -> Vec<String> {
    match table.header() {
        Some(labels) => labels.to_vec(),
        None => resolution
            .roles(table.width())
            .into_iter()
            .enumerate()
            .map(|(index, role)| match role {
                ColumnRole::PlacementId => PLACEMENT_ID_LABEL.to_string(),
                ColumnRole::Tag => TAG_LABEL.to_string(),
                ColumnRole::Unresolved => index.to_string(),
            })
            .collect(),
    }
}
