//! Defines the fatal error types for the converter.

use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned when a conversion cannot continue.
pub enum ConvertError {
    #[error("NEED 2 ARGUMENTS\nARGUMENT FORMAT: input_file output_file")]
    Usage,

    #[error("line {line_number}: {field} '{value}' is not an integer")]
    InvalidNumber {
        line_number: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line_number}: {field} '{value}' does not fit in a 64-bit integer")]
    NumberOutOfRange {
        line_number: usize,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
