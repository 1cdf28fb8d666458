//! Tag sheet ingestion.
//!
//! Loads a tag sheet from disk into a [`tagsheet_model::RawTable`].
//!
//! # Features
//!
//! - **Format gate**: only `csv`, `tsv` and `xlsx` files are accepted
//! - **Readers**: delimited text via `csv`, workbooks via `calamine`
//! - **Header detection**: optional heuristic for the first row
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tagsheet_ingest::{HeaderMode, read_sheet};
//!
//! let table = read_sheet(Path::new("campaign_tags.xlsx"), HeaderMode::Auto)?;
//! println!("{} rows, header: {}", table.height(), table.has_header());
//! ```

mod error;
mod format;
mod header;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Formats ===
pub use format::SheetFormat;
pub use header::HeaderMode;

// === Reading ===
pub use reader::{read_rows, read_sheet, validate_encoding};
