//! Parsing either release format of the JmdictFurigana file.

use crate::{
    error::{ParseError, Result},
    json, line, strip_bom, Entry,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// `TEXT|READING|RANGESPECS` lines.
    Text,
    /// An array of `{text, reading, furigana}` objects.
    Json,
}

impl DatasetFormat {
    /// Guesses the format from the content: JSON starts with `[`.
    pub fn detect(raw: &str) -> Self {
        if strip_bom(raw).trim_start().starts_with('[') {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// The entries of a dataset, along with the lines that were skipped over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDataset {
    pub entries: Vec<Entry>,
    pub skipped: Vec<ParseError>,
}

impl ParsedDataset {
    /// Whether every line of the dataset was parsed.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Parses a dataset in the given format.
///
/// With `skip_invalid`, malformed lines of the text format are logged and
/// skipped instead of failing the whole dataset.
pub fn parse_entries(raw: &str, format: DatasetFormat, skip_invalid: bool) -> Result<ParsedDataset> {
    let parsed = match format {
        DatasetFormat::Json => ParsedDataset {
            entries: json::parse_json_dataset(raw)?,
            skipped: vec![],
        },
        DatasetFormat::Text if skip_invalid => {
            let (entries, skipped) = line::parse_dataset_lossy(raw);
            ParsedDataset { entries, skipped }
        }
        DatasetFormat::Text => ParsedDataset {
            entries: line::parse_dataset(raw)?,
            skipped: vec![],
        },
    };
    Ok(parsed)
}
