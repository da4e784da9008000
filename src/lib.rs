//! Core library for clone-manifest.
//!
//! Reads a Deckard clone-cluster report and writes one `start,count,file`
//! line per clone, keeping a single blank line between clusters.

pub mod cli;
pub mod converter;
pub mod error;
pub mod record;

use crate::cli::Cli;
use env_logger::Env;

pub use crate::converter::{convert, convert_lines, ConversionSummary};
pub use crate::error::ConvertError;
pub use crate::record::{parse_line, CloneRange, Diagnostic, Line, ParsedLine};

/// The main entry point for the application logic.
pub fn run() -> anyhow::Result<()> {
    // Per-line diagnostics are warnings, so show them unless RUST_LOG says otherwise.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let Cli {
        input_file,
        output_file,
    } = Cli::parse_args(std::env::args_os())?;

    let summary = convert(&input_file, &output_file)?;

    log::info!(
        "Converted {} lines from {}: {} records written, {} skipped, {} diagnostics",
        summary.lines_read,
        input_file.display(),
        summary.records_written,
        summary.records_skipped,
        summary.diagnostics
    );

    Ok(())
}
