//! Parses the JmdictFurigana dataset into lookup indexes and converts furigana
//! between the dataset's range encoding, a normalised token sequence and
//! `{ruby}^{rt}` bracket markup.
//! See <https://github.com/Doublevil/JmdictFurigana>

pub mod dataset;
pub mod error;
pub mod index;
pub mod json;
pub mod line;
pub mod markup;
pub mod normalize;
pub mod range;

pub use dataset::{parse_entries, DatasetFormat, ParsedDataset};
pub use error::{Error, ParseError, Result, UnsafeContentError};
pub use index::EntryIndex;
pub use line::{parse_dataset, parse_dataset_lossy, parse_line};
pub use markup::{furigana_to_string, string_to_furigana};

use serde::{Deserialize, Serialize};

/// A span of text annotated with its reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ruby {
    /// The annotated text, e.g. `大人`.
    pub ruby: String,
    /// The reading shown above the text, e.g. `おとな`.
    pub rt: String,
}

impl Ruby {
    pub fn new(ruby: impl Into<String>, rt: impl Into<String>) -> Self {
        Self {
            ruby: ruby.into(),
            rt: rt.into(),
        }
    }
}

/// One token of an annotated word.
///
/// Serialises as a plain JSON string or as a `{"ruby", "rt"}` object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Furigana {
    /// A run of characters without furigana.
    Plain(String),
    /// A span with furigana.
    Ruby(Ruby),
}

impl Furigana {
    /// The text this token covers in the annotated word.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(plain) => plain,
            Self::Ruby(ruby) => &ruby.ruby,
        }
    }
}

impl From<Ruby> for Furigana {
    fn from(value: Ruby) -> Self {
        Self::Ruby(value)
    }
}

impl From<&str> for Furigana {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

/// A single record of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The written form, e.g. `大人買い`.
    pub text: String,
    /// The reading of the whole written form, e.g. `おとながい`.
    pub reading: String,
    /// The written form split into tokens.
    pub furigana: Vec<Furigana>,
}

impl Entry {
    /// Concatenates the text of each furigana token.
    /// For well-formed entries this equals `text`.
    pub fn surface(&self) -> String {
        concat_text(&self.furigana)
    }
}

/// Concatenates the text each token covers, ignoring the readings.
pub fn concat_text(furigana: &[Furigana]) -> String {
    furigana.iter().map(Furigana::text).collect()
}

/// Removes a leading byte order mark, which the dataset files may start with.
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn furigana_serialises_untagged() {
        let furigana = vec![Furigana::from(Ruby::new("買", "が")), Furigana::from("い")];
        let json = serde_json::to_string(&furigana).unwrap();
        assert_eq!(json, r#"[{"ruby":"買","rt":"が"},"い"]"#);
        let back: Vec<Furigana> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, furigana);
    }

    #[test]
    fn strips_bom() {
        assert_eq!(strip_bom("\u{feff}[]"), "[]");
        assert_eq!(strip_bom("[]"), "[]");
    }

    #[test]
    fn surface_concatenates_tokens() {
        let entry = Entry {
            text: "頑張る".to_string(),
            reading: "がんばる".to_string(),
            furigana: vec![
                Ruby::new("頑", "がん").into(),
                Ruby::new("張", "ば").into(),
                "る".into(),
            ],
        };
        assert_eq!(entry.surface(), entry.text);
    }
}
