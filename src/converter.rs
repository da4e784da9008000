//! Drives the line-by-line conversion and the blank separator rule.

use crate::error::ConvertError;
use crate::record::{parse_line, Line};
use anyhow::Context;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Counters collected over one conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub lines_read: usize,
    pub records_written: usize,
    pub separators_written: usize,
    pub records_skipped: usize,
    pub diagnostics: usize,
}

/// Converts every line of `reader` into manifest lines on `writer`.
///
/// A blank input line becomes a single blank output line, but only directly
/// after a written record. The manifest therefore never starts with a blank
/// line and never contains two in a row.
pub fn convert_lines<R, W>(reader: R, mut writer: W) -> Result<ConversionSummary, ConvertError>
where
    R: BufRead,
    W: Write,
{
    let mut summary = ConversionSummary::default();
    let mut separator_allowed = false;

    for (index, text) in reader.lines().enumerate() {
        let text = text?;
        let line_number = index + 1;
        summary.lines_read += 1;

        match parse_line(&text, line_number)? {
            Line::Blank => {
                if separator_allowed {
                    writeln!(writer)?;
                    summary.separators_written += 1;
                    separator_allowed = false;
                }
            }
            Line::Data(parsed) => {
                for diagnostic in &parsed.diagnostics {
                    log::warn!("line {line_number}: {diagnostic}: {}", text.trim_end());
                }
                summary.diagnostics += parsed.diagnostics.len();

                match parsed.range {
                    Some(range) => {
                        log::debug!("line {line_number}: {range}");
                        writeln!(writer, "{range}")?;
                        summary.records_written += 1;
                        separator_allowed = true;
                    }
                    None => summary.records_skipped += 1,
                }
            }
        }
    }

    writer.flush()?;
    Ok(summary)
}

/// Converts the clone report at `input_path` into a manifest at `output_path`.
///
/// The manifest is built in memory and written only once every line has been
/// converted, so a fatal error leaves `output_path` untouched.
pub fn convert(input_path: &Path, output_path: &Path) -> anyhow::Result<ConversionSummary> {
    let input = File::open(input_path)
        .with_context(|| format!("Failed to open input file: {}", input_path.display()))?;

    let mut manifest = Vec::new();
    let summary = convert_lines(BufReader::new(input), &mut manifest)
        .with_context(|| format!("Failed to convert {}", input_path.display()))?;

    fs::write(output_path, &manifest)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (String, ConversionSummary) {
        let mut output = Vec::new();
        let summary = convert_lines(Cursor::new(input), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    #[test]
    fn test_c1_end_to_end_example() {
        let (output, summary) =
            run("FILE test.c LINE:1:3\n\nFILE test.c LINE:10:2\n");
        assert_eq!(output, "1,3,test.c\n\n10,2,test.c\n");
        assert_eq!(
            summary,
            ConversionSummary {
                lines_read: 3,
                records_written: 2,
                separators_written: 1,
                records_skipped: 0,
                diagnostics: 0,
            }
        );
    }

    #[test]
    fn test_c2_leading_blank_lines_are_dropped() {
        let (output, _) = run("\n\n   \nFILE a.c LINE:1:1\n");
        assert_eq!(output, "1,1,a.c\n");
    }

    #[test]
    fn test_c3_runs_of_blank_lines_collapse_to_one() {
        let (output, summary) = run("FILE a.c LINE:1:1\n\n\n\t\n\nFILE b.c LINE:2:2\n\n\n");
        assert_eq!(output, "1,1,a.c\n\n2,2,b.c\n\n");
        assert_eq!(summary.separators_written, 2);
    }

    #[test]
    fn test_c4_skipped_record_does_not_enable_separator() {
        let (output, summary) = run("FILE a.c\n\nFILE b.c LINE:2:2\n");
        assert_eq!(output, "2,2,b.c\n");
        assert_eq!(summary.records_skipped, 1);
        assert_eq!(summary.diagnostics, 2);
    }

    #[test]
    fn test_c5_skipped_record_keeps_pending_separator() {
        let (output, _) = run("FILE a.c LINE:1:1\nFILE broken.c LINE:1\n\nFILE b.c LINE:2:2\n");
        assert_eq!(output, "1,1,a.c\n\n2,2,b.c\n");
    }

    #[test]
    fn test_c6_consecutive_records_have_no_separator() {
        let (output, _) = run("FILE a.c LINE:1:1\nFILE b.c LINE:2:2\r\n");
        assert_eq!(output, "1,1,a.c\n2,2,b.c\n");
    }

    #[test]
    fn test_c7_empty_input_gives_empty_output() {
        let (output, summary) = run("");
        assert_eq!(output, "");
        assert_eq!(summary, ConversionSummary::default());
    }

    #[test]
    fn test_c8_invalid_number_aborts_with_line_number() {
        let mut output = Vec::new();
        let err = convert_lines(
            Cursor::new("FILE a.c LINE:1:1\n\nFILE b.c LINE:two:2\n"),
            &mut output,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConvertError::InvalidNumber { line_number: 3, .. }
        ));
        assert_eq!(err.to_string(), "line 3: start line 'two' is not an integer");
    }

    #[test]
    fn test_c9_convert_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clusters.txt");
        let output = dir.path().join("manifest.txt");
        std::fs::write(&input, "FILE x.c LINE:7:3\n").unwrap();

        let summary = convert(&input, &output).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "7,3,x.c\n");
        assert_eq!(summary.records_written, 1);
    }

    #[test]
    fn test_c10_failed_conversion_leaves_existing_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clusters.txt");
        let output = dir.path().join("manifest.txt");
        std::fs::write(&input, "FILE x.c LINE:7:x\n").unwrap();
        std::fs::write(&output, "previous\n").unwrap();

        let err = convert(&input, &output).unwrap_err();

        assert!(err.to_string().contains("Failed to convert"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous\n");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[test]
    fn test_c11_missing_input_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.txt");
        let output = dir.path().join("manifest.txt");

        let err = convert(&input, &output).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to open input file"));
        assert!(!output.exists());
    }
}
