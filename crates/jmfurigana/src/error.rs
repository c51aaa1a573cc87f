//! Error types for parsing and encoding furigana.

use std::num::ParseIntError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    UnsafeContent(#[from] UnsafeContentError),
    #[error("Invalid JSON dataset")]
    Json(#[from] serde_json::Error),
}

/// A malformed dataset line or range spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Expected 3 '|'-separated fields in '{line}', found {found}")]
    FieldCount { line: String, found: usize },
    #[error("Empty {field} field in '{line}'")]
    EmptyField { line: String, field: &'static str },
    #[error("Range spec '{spec}' is missing a range or a reading")]
    MissingPart { spec: String },
    #[error("Invalid bound '{bound}' in range spec '{spec}'")]
    InvalidBound {
        spec: String,
        bound: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Range spec '{spec}' ends before it starts")]
    ReversedRange { spec: String },
    #[error("Range spec '{spec}' is out of bounds for '{text}' ({len} characters)")]
    OutOfBounds {
        spec: String,
        text: String,
        len: usize,
    },
    #[error("Range spec '{spec}' overlaps an earlier range in '{text}'")]
    Overlap { spec: String, text: String },
    #[error("Failed to parse line {number} '{line}'")]
    Line {
        number: usize,
        line: String,
        #[source]
        source: Box<ParseError>,
    },
}

/// Furigana that cannot be written as bracket markup: text containing `{` or `}`,
/// or a ruby with an empty or multi-line ruby or reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Furigana token '{token}' cannot be written as bracket markup")]
pub struct UnsafeContentError {
    pub token: String,
}
