use std::io::{self, Read};

use anyhow::{Context, Result};
use tracing::info;

use tagsheet_cli::{ProcessResult, RunReport, run_process, write_report};
use tagsheet_model::NormalizationContext;
use tagsheet_transform::{CleanedTag, clean, macro_dialect, vendor_rules};

use crate::cli::{CleanArgs, ProcessArgs};
use crate::summary::print_vendors;

/// Tag argument that means "read the tag from stdin".
const STDIN_MARKER: &str = "-";

pub fn run_process_command(args: &ProcessArgs) -> Result<ProcessResult> {
    let options = args.options();
    let result = run_process(&args.file, &options)
        .with_context(|| format!("process {}", args.file.display()))?;

    if let Some(report_path) = &args.report {
        let report = RunReport::new(&result, &options)
            .with_context(|| format!("hash input {}", result.input.display()))?;
        write_report(&report, report_path)
            .with_context(|| format!("write report {}", report_path.display()))?;
    }
    Ok(result)
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanedTag> {
    let raw = if args.tag == STDIN_MARKER {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("read tag from stdin")?;
        input.trim_end_matches(['\r', '\n']).to_string()
    } else {
        args.tag.clone()
    };
    let ctx = NormalizationContext::new().with_kids_compliance(args.kids_compliance);
    let cleaned = clean(&raw, &ctx);
    info!(notes = %cleaned.notes, "tag cleaned");
    Ok(cleaned)
}

pub fn run_vendors() {
    print_vendors(vendor_rules(), macro_dialect());
}
