//! JSON run report.
//!
//! The report records the exact configuration of a run next to what it
//! found, so a processed sheet can be traced back to its input.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use tagsheet_ingest::SheetFormat;
use tagsheet_map::ColumnResolution;

use crate::pipeline::ProcessOptions;
use crate::types::{NoteCount, ProcessResult};

const BUFFER_SIZE: usize = 65536;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub input_sha256: String,
    pub format: SheetFormat,
    pub generated_at: DateTime<Utc>,
    pub options: ProcessOptions,
    pub has_header: bool,
    pub resolution: ColumnResolution,
    pub rows: usize,
    pub note_counts: Vec<NoteCount>,
    pub output: Option<PathBuf>,
}

impl RunReport {
    /// Builds the report for a finished run, hashing the input file.
    pub fn new(result: &ProcessResult, options: &ProcessOptions) -> io::Result<Self> {
        Ok(Self {
            input: result.input.clone(),
            input_sha256: compute_file_sha256(&result.input)?,
            format: result.format,
            generated_at: Utc::now(),
            options: options.clone(),
            has_header: result.has_header,
            resolution: result.resolution,
            rows: result.rows(),
            note_counts: result.note_counts.clone(),
            output: result.output.clone(),
        })
    }
}

/// Compute the SHA-256 hash of a file as lower-case hex.
pub fn compute_file_sha256(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hash = hex::encode(hasher.finalize());
    debug!(path = %path.display(), sha256 = %hash, "input hashed");
    Ok(hash)
}

/// Writes `report` as pretty-printed JSON.
pub fn write_report(report: &RunReport, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(path = %path.display(), "run report written");
    Ok(())
}
