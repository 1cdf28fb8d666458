//! Sheet processing pipeline.
//!
//! Stages run strictly in order: ingest, resolve, normalize, output. Column
//! resolution finishes before any row is normalized, and a resolution failure
//! aborts the run before anything is written.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, info_span, trace};

use tagsheet_ingest::{HeaderMode, SheetFormat, read_sheet};
use tagsheet_map::{ColumnResolution, ColumnResolver, ResolverOptions};
use tagsheet_model::{NormalizationContext, RawTable, TagRecord};
use tagsheet_output::{augment, processed_path, write_table};
use tagsheet_transform::build_records;

use crate::error::ProcessError;
use crate::logging::redact_tag;
use crate::types::{ProcessResult, count_notes};

/// Everything that configures one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessOptions {
    pub normalization: NormalizationContext,
    pub header_mode: HeaderMode,
    pub resolver: ResolverOptions,
    /// Directory for the processed file; next to the input when `None`.
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Processes one sheet end to end.
///
/// # Errors
///
/// [`ProcessError::UnsupportedFormat`] for unknown extensions,
/// [`ProcessError::ColumnResolution`] when a required column is missing, and
/// [`ProcessError::Unexpected`] for any other read or write failure.
pub fn run_process(input: &Path, options: &ProcessOptions) -> Result<ProcessResult, ProcessError> {
    let process_span = info_span!("process", file = %input.display());
    let _process_guard = process_span.enter();
    let process_start = Instant::now();

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let format = SheetFormat::from_path(input)?;
    let table = info_span!("ingest").in_scope(|| ingest(input, options.header_mode))?;

    // =========================================================================
    // Stage 2: Resolve columns
    // =========================================================================
    let resolution = info_span!("resolve").in_scope(|| resolve(&table, &options.resolver))?;

    // =========================================================================
    // Stage 3: Normalize tags
    // =========================================================================
    let records = info_span!("normalize")
        .in_scope(|| normalize(&table, &resolution, &options.normalization));

    // =========================================================================
    // Stage 4: Output
    // =========================================================================
    let output = info_span!("output").in_scope(|| {
        output(input, format, &table, &resolution, &records, options)
    })?;

    let note_counts = count_notes(&records);
    info!(
        rows = records.len(),
        written = output.is_some(),
        duration_ms = process_start.elapsed().as_millis(),
        "sheet processed"
    );

    Ok(ProcessResult {
        input: input.to_path_buf(),
        format,
        output,
        has_header: table.has_header(),
        resolution,
        placement_label: table
            .header_label(resolution.placement_id.index)
            .map(str::to_string),
        tag_label: table.header_label(resolution.tag.index).map(str::to_string),
        records,
        note_counts,
    })
}

fn ingest(input: &Path, header_mode: HeaderMode) -> Result<RawTable, ProcessError> {
    let start = Instant::now();
    let table = read_sheet(input, header_mode)?;
    info!(
        rows = table.height(),
        columns = table.width(),
        has_header = table.has_header(),
        %header_mode,
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}

fn resolve(
    table: &RawTable,
    options: &ResolverOptions,
) -> Result<ColumnResolution, ProcessError> {
    let start = Instant::now();
    let resolution = ColumnResolver::new(options.clone()).resolve(table)?;
    info!(
        placement_column = resolution.placement_id.index,
        tag_column = resolution.tag.index,
        duration_ms = start.elapsed().as_millis(),
        "resolve complete"
    );
    Ok(resolution)
}

fn normalize(
    table: &RawTable,
    resolution: &ColumnResolution,
    ctx: &NormalizationContext,
) -> Vec<TagRecord> {
    let start = Instant::now();
    let records = build_records(
        table,
        resolution.placement_id.index,
        resolution.tag.index,
        ctx,
    );
    for (row, record) in records.iter().enumerate() {
        trace!(
            row,
            placement_id = %record.placement_id,
            raw_tag = redact_tag(&record.raw_tag),
            cleaned_tag = redact_tag(&record.cleaned_tag),
            notes = %record.notes,
            "tag cleaned"
        );
    }
    info!(
        rows = records.len(),
        kids_compliance = ctx.apply_kids_compliance,
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );
    records
}

fn output(
    input: &Path,
    format: SheetFormat,
    table: &RawTable,
    resolution: &ColumnResolution,
    records: &[TagRecord],
    options: &ProcessOptions,
) -> Result<Option<PathBuf>, ProcessError> {
    let start = Instant::now();
    let augmented = augment(table, resolution, records)?;
    if options.dry_run {
        info!(
            columns = augmented.width(),
            "dry run: processed sheet not written"
        );
        return Ok(None);
    }
    let path = processed_path(input, options.output_dir.as_deref())?;
    write_table(&augmented, &path, format)?;
    info!(
        path = %path.display(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(Some(path))
}
