//! Token-level parsing of a single clone-report line.

use crate::error::ConvertError;
use std::fmt;
use std::num::IntErrorKind;
use thiserror::Error;

const FILE_KEYWORD: &str = "FILE";
const LINE_PREFIX: &str = "LINE";

/// A validated clone location, rendered as `start_line,num_lines,filename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRange {
    pub start_line: i64,
    pub num_lines: i64,
    pub filename: String,
}

impl fmt::Display for CloneRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.start_line, self.num_lines, self.filename)
    }
}

/// A recoverable problem found on one line. The line is still consumed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("bad line delimiter in token '{token}'")]
    MalformedLineToken { token: String },

    #[error("FILE keyword has no value")]
    DanglingFileKeyword,

    #[error("no filename found")]
    MissingFilename,

    #[error("no start line found")]
    MissingStartLine,

    #[error("no line count found")]
    MissingNumLines,
}

/// Outcome of scanning one data-bearing line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedLine {
    /// `None` when any field was missing; the line produces no output record.
    pub range: Option<CloneRange>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Blank,
    Data(ParsedLine),
}

/// Parses one input line. `line_number` is 1-based and only used for errors.
///
/// `FILE` and well-formed `LINE:<start>:<count>` tokens may appear anywhere and
/// in any order; when one appears more than once the last occurrence wins.
pub fn parse_line(text: &str, line_number: usize) -> Result<Line, ConvertError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Line::Blank);
    }

    let mut filename: Option<&str> = None;
    let mut start_line: Option<i64> = None;
    let mut num_lines: Option<i64> = None;
    let mut diagnostics = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        if *token == FILE_KEYWORD {
            filename = tokens.get(index + 1).copied();
            if filename.is_none() {
                diagnostics.push(Diagnostic::DanglingFileKeyword);
            }
        }

        if token.starts_with(LINE_PREFIX) {
            let parts: Vec<&str> = token.split(':').collect();
            if let [_, start, count] = parts.as_slice() {
                start_line = Some(parse_field(start, "start line", line_number)?);
                num_lines = Some(parse_field(count, "line count", line_number)?);
            } else {
                diagnostics.push(Diagnostic::MalformedLineToken {
                    token: (*token).to_string(),
                });
            }
        }
    }

    if filename.is_none() {
        diagnostics.push(Diagnostic::MissingFilename);
    }
    if start_line.is_none() {
        diagnostics.push(Diagnostic::MissingStartLine);
    }
    if num_lines.is_none() {
        diagnostics.push(Diagnostic::MissingNumLines);
    }

    let range = match (filename, start_line, num_lines) {
        (Some(filename), Some(start_line), Some(num_lines)) => Some(CloneRange {
            start_line,
            num_lines,
            filename: filename.to_string(),
        }),
        _ => None,
    };

    Ok(Line::Data(ParsedLine { range, diagnostics }))
}

fn parse_field(value: &str, field: &'static str, line_number: usize) -> Result<i64, ConvertError> {
    value.parse::<i64>().map_err(|source| {
        if matches!(
            source.kind(),
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
        ) {
            ConvertError::NumberOutOfRange {
                line_number,
                field,
                value: value.to_string(),
            }
        } else {
            ConvertError::InvalidNumber {
                line_number,
                field,
                value: value.to_string(),
                source,
            }
        }
    })
}
