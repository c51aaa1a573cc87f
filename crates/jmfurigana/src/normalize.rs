//! Collapses per-character slots into the minimal furigana sequence.

use crate::{Furigana, Ruby};

/// What occupies a single character position of an annotated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A character without furigana.
    Unclaimed(char),
    /// The first position of a span with furigana.
    Claimed(Ruby),
    /// A later position of a span, already covered by the preceding `Claimed`.
    Absorbed,
}

/// Builds a furigana sequence where no two plain tokens are adjacent.
#[derive(Debug, Default)]
pub struct Normalizer {
    furigana: Vec<Furigana>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends plain text, extending the last token if it is also plain.
    pub fn push_plain(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        // merging looks at what was emitted, not at the previous input
        match self.furigana.last_mut() {
            Some(Furigana::Plain(last)) => last.push_str(s),
            _ => self.furigana.push(Furigana::Plain(s.to_string())),
        }
    }

    pub fn push_ruby(&mut self, ruby: Ruby) {
        self.furigana.push(Furigana::Ruby(ruby));
    }

    pub fn push_slot(&mut self, slot: Slot) {
        match slot {
            Slot::Unclaimed(c) => self.push_plain(c.encode_utf8(&mut [0; 4])),
            Slot::Claimed(ruby) => self.push_ruby(ruby),
            Slot::Absorbed => {}
        }
    }

    pub fn push(&mut self, furigana: Furigana) {
        match furigana {
            Furigana::Plain(plain) => self.push_plain(&plain),
            Furigana::Ruby(ruby) => self.push_ruby(ruby),
        }
    }

    pub fn finish(self) -> Vec<Furigana> {
        self.furigana
    }
}

/// Skips absorbed slots, keeps each ruby as its own token and merges runs of
/// unclaimed characters into single plain tokens.
pub fn normalize(slots: impl IntoIterator<Item = Slot>) -> Vec<Furigana> {
    let mut normalizer = Normalizer::new();
    for slot in slots {
        normalizer.push_slot(slot);
    }
    normalizer.finish()
}

/// Merges adjacent plain tokens and drops empty ones.
/// Already normalised sequences are returned unchanged.
pub fn normalize_furigana(furigana: impl IntoIterator<Item = Furigana>) -> Vec<Furigana> {
    let mut normalizer = Normalizer::new();
    for f in furigana {
        normalizer.push(f);
    }
    normalizer.finish()
}
