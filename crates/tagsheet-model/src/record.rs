use serde::Serialize;

use crate::notes::TagNotes;

/// Outcome of processing one sheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub placement_id: String,
    pub raw_tag: String,
    pub cleaned_tag: String,
    pub notes: TagNotes,
}
