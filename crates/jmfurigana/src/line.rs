//! Parses the pipe-delimited dataset format, one entry per line:
//! `大人買い|おとながい|0-1:おとな;2:が`

use crate::{error::ParseError, range, strip_bom, Entry};

/// Parses a single `TEXT|READING|RANGESPECS` line.
pub fn parse_line(line: &str) -> Result<Entry, ParseError> {
    let fields = line.split('|').collect::<Vec<_>>();
    let [text, reading, raw_furigana] = fields[..] else {
        return Err(ParseError::FieldCount {
            line: line.to_string(),
            found: fields.len(),
        });
    };
    for (field, value) in [("text", text), ("reading", reading), ("furigana", raw_furigana)] {
        if value.is_empty() {
            return Err(ParseError::EmptyField {
                line: line.to_string(),
                field,
            });
        }
    }

    let furigana = range::decode(text, raw_furigana)?;
    Ok(Entry {
        text: text.to_string(),
        reading: reading.to_string(),
        furigana,
    })
}

/// Renders an entry as a dataset line. The inverse of [`parse_line`].
pub fn format_line(entry: &Entry) -> String {
    format!(
        "{}|{}|{}",
        entry.text,
        entry.reading,
        range::encode(&entry.furigana)
    )
}

/// Parses a whole dataset, one entry per non-blank line in file order.
/// Fails on the first malformed line.
pub fn parse_dataset(raw: &str) -> Result<Vec<Entry>, ParseError> {
    let entries = lines(raw)
        .map(|(number, line)| parse_line(line).map_err(|err| at_line(number, line, err)))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!("parsed {} entries", entries.len());
    Ok(entries)
}

/// Parses a whole dataset, skipping malformed lines.
/// Returns the parsed entries and an error for every skipped line.
pub fn parse_dataset_lossy(raw: &str) -> (Vec<Entry>, Vec<ParseError>) {
    let mut entries = vec![];
    let mut errors = vec![];
    for (number, line) in lines(raw) {
        match parse_line(line) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                let err = at_line(number, line, err);
                tracing::warn!("skipping: {err}");
                errors.push(err);
            }
        }
    }
    tracing::debug!(
        "parsed {} entries, skipped {} lines",
        entries.len(),
        errors.len()
    );
    (entries, errors)
}

// blank lines, e.g. the one at the end of the file, are skipped
fn lines(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    strip_bom(raw)
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.is_empty())
}

fn at_line(number: usize, line: &str, err: ParseError) -> ParseError {
    ParseError::Line {
        number,
        line: line.to_string(),
        source: Box::new(err),
    }
}
