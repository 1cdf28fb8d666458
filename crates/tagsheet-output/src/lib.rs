//! Processed tag sheet output.
//!
//! - **augment**: append the placement ID mapping, cleaned tag and notes
//!   columns to the original table
//! - **write**: serialize the result as CSV, TSV or XLSX under the
//!   `processed_` file name

mod augment;
mod error;
mod write;

pub use augment::{
    AugmentedTable, CLEANED_TAG_COLUMN, NOTES_COLUMN, PLACEMENT_ID_MAPPING_COLUMN, augment,
};
pub use error::{OutputError, Result};
pub use write::{PROCESSED_PREFIX, processed_file_name, processed_path, write_table};
