use std::path::PathBuf;

use serde::Serialize;

use tagsheet_ingest::SheetFormat;
use tagsheet_map::ColumnResolution;
use tagsheet_model::{TagNote, TagRecord};

/// Outcome of processing one sheet.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub input: PathBuf,
    pub format: SheetFormat,
    /// `None` for a dry run.
    pub output: Option<PathBuf>,
    pub has_header: bool,
    pub resolution: ColumnResolution,
    /// Header labels of the resolved columns, when the sheet had a header.
    pub placement_label: Option<String>,
    pub tag_label: Option<String>,
    pub records: Vec<TagRecord>,
    pub note_counts: Vec<NoteCount>,
}

impl ProcessResult {
    pub fn rows(&self) -> usize {
        self.records.len()
    }
}

/// Number of rows that received a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteCount {
    pub note: &'static str,
    pub count: usize,
}

/// Per-note row counts in note order, omitting notes that never fired.
pub fn count_notes(records: &[TagRecord]) -> Vec<NoteCount> {
    TagNote::ALL
        .iter()
        .map(|note| NoteCount {
            note: note.as_str(),
            count: records
                .iter()
                .filter(|record| record.notes.contains(*note))
                .count(),
        })
        .filter(|entry| entry.count > 0)
        .collect()
}
