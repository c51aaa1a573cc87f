//! A line-delimited JSON cache of parsed entries, one entry per line.

use crate::error::{DataError, DataResult};
use jmfurigana::Entry;
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

/// Writes the entries to `path`, replacing any existing cache.
pub fn write_cache(path: &Path, entries: &[Entry]) -> DataResult<()> {
    // the cache is only replaced once fully written
    let tmp_path = path.with_extension("tmp");
    if let Err(err) = write_entries(&tmp_path, entries) {
        // nothing to clean up if the file was never created
        let _ = fs::remove_file(&tmp_path);
        return Err(DataError::io(&tmp_path)(err));
    }
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(DataError::io(path)(err));
    }
    tracing::debug!("cached {} entries to {}", entries.len(), path.display());
    Ok(())
}

fn write_entries(path: &Path, entries: &[Entry]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for entry in entries {
        serde_json::to_writer(&mut writer, entry)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Reads entries written by [`write_cache`].
pub fn read_cache(path: &Path) -> DataResult<Vec<Entry>> {
    let contents = fs::read_to_string(path).map_err(DataError::io(path))?;
    let mut entries = vec![];
    for (idx, line) in contents.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let entry = serde_json::from_str(line).map_err(|source| DataError::Cache {
            path: path.to_path_buf(),
            number: idx + 1,
            source,
        })?;
        entries.push(entry);
    }
    tracing::debug!("read {} cached entries from {}", entries.len(), path.display());
    Ok(entries)
}
