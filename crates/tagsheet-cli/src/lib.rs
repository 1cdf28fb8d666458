//! Library components of the `tagsheet` command line tool.

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;

pub use error::ProcessError;
pub use pipeline::{ProcessOptions, run_process};
pub use report::{RunReport, compute_file_sha256, write_report};
pub use types::{NoteCount, ProcessResult};
