//! Row-parallel application of [`clean`] over a resolved table.

use rayon::prelude::*;
use tracing::debug;

use tagsheet_model::{CellValue, NormalizationContext, RawTable, TagRecord};

use crate::clean::clean_cell;

/// Builds one [`TagRecord`] per table row, in row order.
///
/// Rows are cleaned in parallel; no state is shared between rows.
pub fn build_records(
    table: &RawTable,
    placement_column: usize,
    tag_column: usize,
    ctx: &NormalizationContext,
) -> Vec<TagRecord> {
    let records: Vec<TagRecord> = table
        .rows()
        .par_iter()
        .map(|row| {
            let placement_id = cell_text(row.get(placement_column));
            let raw = row.get(tag_column).unwrap_or(&CellValue::Missing);
            let cleaned = clean_cell(raw, ctx);
            TagRecord {
                placement_id,
                raw_tag: raw.to_string(),
                cleaned_tag: cleaned.cleaned_tag,
                notes: cleaned.notes,
            }
        })
        .collect();
    debug!(rows = records.len(), "tag records built");
    records
}

fn cell_text(cell: Option<&CellValue>) -> String {
    cell.map(ToString::to_string).unwrap_or_default()
}
