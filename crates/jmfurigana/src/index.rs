//! Lookup of entries by written form and by reading.

use crate::Entry;
use std::collections::HashMap;

/// Entries indexed by text and by reading.
///
/// A text or reading may map to several entries, which are kept in the order
/// they were inserted. Duplicates are not removed.
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    entries: Vec<Entry>,
    text_to_entry: HashMap<String, Vec<usize>>,
    reading_to_entry: HashMap<String, Vec<usize>>,
}

impl EntryIndex {
    pub fn new(entries: Vec<Entry>) -> Self {
        let mut text_to_entry: HashMap<String, Vec<usize>> = HashMap::new();
        let mut reading_to_entry: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            text_to_entry
                .entry(entry.text.clone())
                .or_default()
                .push(idx);
            reading_to_entry
                .entry(entry.reading.clone())
                .or_default()
                .push(idx);
        }
        tracing::debug!(
            "indexed {} entries, {} texts, {} readings",
            entries.len(),
            text_to_entry.len(),
            reading_to_entry.len()
        );

        Self {
            entries,
            text_to_entry,
            reading_to_entry,
        }
    }

    /// Entries with the given written form, in insertion order.
    pub fn by_text<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.lookup(&self.text_to_entry, text)
    }

    /// Entries with the given reading, in insertion order.
    pub fn by_reading<'a>(&'a self, reading: &str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.lookup(&self.reading_to_entry, reading)
    }

    fn lookup<'a>(
        &'a self,
        map: &'a HashMap<String, Vec<usize>>,
        key: &str,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        let ids = map.get(key).map(Vec::as_slice).unwrap_or_default();
        ids.iter().map(move |&id| &self.entries[id])
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Entry> for EntryIndex {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse_dataset;

    const DATASET: &str = "\
生|き|0:き
生|なま|0:なま
大人買い|おとながい|0-1:おとな;2:が
";

    #[test]
    fn groups_by_text_in_file_order() {
        let index = EntryIndex::new(parse_dataset(DATASET).unwrap());
        let nama = index.by_text("生").collect::<Vec<_>>();
        assert_eq!(nama.len(), 2);
        assert_eq!(nama[0].reading, "き");
        assert_eq!(nama[1].reading, "なま");
        assert_eq!(index.by_text("大人買い").count(), 1);
        assert_eq!(index.by_text("子供").count(), 0);
    }

    #[test]
    fn groups_by_reading() {
        let index = EntryIndex::new(parse_dataset(DATASET).unwrap());
        let entries = index.by_reading("おとながい").collect::<Vec<_>>();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "大人買い");
        assert_eq!(index.by_reading("なま").count(), 1);
    }

    #[test]
    fn keeps_duplicates() {
        let raw = format!("{DATASET}{DATASET}");
        let index = parse_dataset(&raw)
            .unwrap()
            .into_iter()
            .collect::<EntryIndex>();
        assert_eq!(index.len(), 6);
        assert_eq!(index.by_text("生").count(), 4);
        assert_eq!(index.by_reading("おとながい").count(), 2);
    }

    #[test]
    fn empty_index() {
        let index = EntryIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.by_reading("き").count(), 0);
    }
}
