//! Models and parses the JSON release of the JmdictFurigana file.
//!
//! The JSON form is already split into tokens, so it maps directly to entries
//! without going through the range encoding.

use crate::{strip_bom, Entry, Furigana, Ruby};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEntry {
    pub text: String,
    pub reading: String,
    pub furigana: Vec<RawRuby>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRuby {
    pub ruby: String,
    pub rt: Option<String>,
}

impl From<RawRuby> for Furigana {
    fn from(value: RawRuby) -> Self {
        match value.rt {
            Some(rt) if !rt.is_empty() => Furigana::Ruby(Ruby {
                ruby: value.ruby,
                rt,
            }),
            _ => Furigana::Plain(value.ruby),
        }
    }
}

impl From<RawEntry> for Entry {
    fn from(value: RawEntry) -> Self {
        Entry {
            text: value.text,
            reading: value.reading,
            furigana: value.furigana.into_iter().map(Furigana::from).collect(),
        }
    }
}

/// Parses a JSON array of `{text, reading, furigana: [{ruby, rt?}]}` objects.
pub fn parse_json_dataset(raw: &str) -> Result<Vec<Entry>, serde_json::Error> {
    let raw: Vec<RawEntry> = serde_json::from_str(strip_bom(raw))?;
    let entries = raw.into_iter().map(Entry::from).collect::<Vec<_>>();
    tracing::debug!("parsed {} JSON entries", entries.len());
    Ok(entries)
}
