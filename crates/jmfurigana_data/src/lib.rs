//! Loads the JmdictFurigana dataset from disk, caching the parsed entries,
//! and downloads new releases of it.

pub mod cache;
pub mod config;
pub mod error;
pub mod release;

pub use config::Config;
pub use error::{DataError, DataResult};

use jmfurigana::{DatasetFormat, EntryIndex, ParsedDataset};
use std::{fs, path::Path};

/// Whether `path` is a regular file with some content.
pub fn file_ok(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Reads and parses the dataset at `path`, detecting the format when `format` is `None`.
pub fn load_dataset(
    path: &Path,
    format: Option<DatasetFormat>,
    skip_invalid: bool,
) -> DataResult<ParsedDataset> {
    tracing::info!("reading dataset {}", path.display());
    let raw = fs::read_to_string(path).map_err(DataError::io(path))?;
    let format = format.unwrap_or_else(|| DatasetFormat::detect(&raw));
    tracing::info!("parsing dataset as {format:?}");
    jmfurigana::parse_entries(&raw, format, skip_invalid).map_err(|source| DataError::Dataset {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the entry index, preferring the cache over the raw dataset.
///
/// An unreadable cache is logged and the dataset used instead. On a cache miss
/// the dataset is parsed and the cache written, unless lines of the dataset
/// were skipped. Failing to write the cache is logged and otherwise ignored.
pub fn setup(config: &Config) -> DataResult<EntryIndex> {
    if let Some(cache_path) = config.cache_path.as_deref().filter(|p| file_ok(p)) {
        tracing::info!("loading cache {}", cache_path.display());
        match cache::read_cache(cache_path) {
            Ok(entries) => return Ok(EntryIndex::new(entries)),
            Err(err) if file_ok(&config.dataset_path) => {
                tracing::warn!("ignoring cache: {err}");
            }
            Err(err) => return Err(err),
        }
    }

    if file_ok(&config.dataset_path) {
        let parsed = load_dataset(&config.dataset_path, config.format, config.skip_invalid)?;
        if let Some(cache_path) = &config.cache_path {
            if !parsed.is_complete() {
                tracing::warn!(
                    "skipped {} lines of the dataset, not writing cache",
                    parsed.skipped.len()
                );
            } else if let Err(err) = cache::write_cache(cache_path, &parsed.entries) {
                tracing::warn!("failed to write cache: {err}");
            }
        }
        return Ok(EntryIndex::new(parsed.entries));
    }

    Err(DataError::MissingDataset {
        dataset: config.dataset_path.clone(),
        cache: config.cache_path.clone(),
    })
}
