//! CLI argument definitions for the tag sheet normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tagsheet_cli::ProcessOptions;
use tagsheet_ingest::HeaderMode;
use tagsheet_map::{ResolverOptions, TagDetector};
use tagsheet_model::NormalizationContext;

#[derive(Parser)]
#[command(
    name = "tagsheet",
    version,
    about = "Tag sheet normalizer - Canonicalize ad tag cachebusters",
    long_about = "Normalize advertising tag sheets for ad servers.\n\n\
                  Locates the placement ID and tag columns, rewrites vendor macros\n\
                  to %%CACHEBUSTER%%, applies vendor rules and writes\n\
                  processed_<file> next to the input."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include raw tag values in trace logs (redacted otherwise).
    #[arg(long = "log-tags", global = true)]
    pub log_tags: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process a tag sheet and write processed_<file>.
    Process(ProcessArgs),

    /// Clean a single tag.
    Clean(CleanArgs),

    /// List vendor rules and the macro dialect.
    Vendors,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Tag sheet to process (csv, tsv or xlsx).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Force child-directed treatment and TFUA on Campaign Manager tags.
    #[arg(long = "kids-compliance")]
    pub kids_compliance: bool,

    /// Whether the first row is a header.
    #[arg(long = "header", value_enum, default_value = "auto")]
    pub header: HeaderArg,

    /// Tag column detectors, in priority order (default: url,timestamp).
    #[arg(long = "tag-detector", value_enum, value_delimiter = ',')]
    pub tag_detectors: Vec<TagDetectorArg>,

    /// Output directory for the processed file (default: next to FILE).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Resolve and clean without writing the processed file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a JSON run report to PATH.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl ProcessArgs {
    pub fn options(&self) -> ProcessOptions {
        let mut detectors: Vec<TagDetector> = Vec::new();
        for detector in self.tag_detectors.iter().map(|arg| arg.detector()) {
            if !detectors.contains(&detector) {
                detectors.push(detector);
            }
        }
        let resolver = if detectors.is_empty() {
            ResolverOptions::default()
        } else {
            ResolverOptions::default().with_tag_detectors(detectors)
        };
        ProcessOptions {
            normalization: NormalizationContext::new().with_kids_compliance(self.kids_compliance),
            header_mode: self.header.mode(),
            resolver,
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Tag to clean, or `-` to read it from stdin.
    #[arg(value_name = "TAG")]
    pub tag: String,

    /// Force child-directed treatment and TFUA on Campaign Manager tags.
    #[arg(long = "kids-compliance")]
    pub kids_compliance: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HeaderArg {
    Auto,
    Present,
    Absent,
}

impl HeaderArg {
    fn mode(self) -> HeaderMode {
        match self {
            Self::Auto => HeaderMode::Auto,
            Self::Present => HeaderMode::Present,
            Self::Absent => HeaderMode::Absent,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TagDetectorArg {
    /// Cells containing `http`.
    Url,
    /// Cells containing `timestamp`.
    Timestamp,
}

impl TagDetectorArg {
    fn detector(self) -> TagDetector {
        match self {
            Self::Url => TagDetector::Url,
            Self::Timestamp => TagDetector::TimestampMacro,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
