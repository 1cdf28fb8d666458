#![deny(unsafe_code)]

//! Column resolution for tag sheets.
//!
//! Tag sheets arrive with unknown or irregular layouts. The resolver finds
//! the placement ID column and the tag column, trying header labels first
//! and then sampling cell values with configurable detectors. The strategy
//! that located each column is reported for diagnostics.

mod detect;
mod error;
mod resolver;

pub use detect::{
    SAMPLE_SIZE, TagDetector, is_placement_header, is_placement_id, is_tag_header,
};
pub use error::ColumnResolutionError;
pub use resolver::{
    ColumnResolution, ColumnResolver, ResolutionStrategy, ResolvedColumn, ResolverOptions, resolve,
};
