//! Data model shared by the tag sheet crates.
//!
//! - **table**: untyped cells and the rectangular [`RawTable`]
//! - **roles**: [`ColumnRole`] assigned to columns by the resolver
//! - **notes**: [`TagNote`] texts and the [`TagNotes`] set
//! - **record**: the per-row [`TagRecord`]
//! - **options**: the per-invocation [`NormalizationContext`]

#![deny(unsafe_code)]

pub mod notes;
pub mod options;
pub mod record;
pub mod roles;
pub mod table;

pub use notes::{NOTE_SEPARATOR, TagNote, TagNotes};
pub use options::NormalizationContext;
pub use record::TagRecord;
pub use roles::ColumnRole;
pub use table::{CellValue, RawTable, format_number};
