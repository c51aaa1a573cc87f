//! Configuration read from the environment.

use crate::error::{DataError, DataResult};
use jmfurigana::DatasetFormat;
use std::{env, path::PathBuf};

pub const DEFAULT_DATASET: &str = "JmdictFurigana.txt";
pub const DEFAULT_CACHE: &str = "JmdictFurigana.ldjson";
pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/Doublevil/JmdictFurigana/releases/latest";
pub const DEFAULT_ASSET: &str = "JmdictFurigana.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The raw dataset, in either format.
    pub dataset_path: PathBuf,
    /// The line-delimited JSON cache of parsed entries. `None` disables caching.
    pub cache_path: Option<PathBuf>,
    /// The GitHub API URL of the latest dataset release.
    pub release_url: String,
    /// The name of the release asset to download.
    pub asset_name: String,
    /// Detected from the content when `None`.
    pub format: Option<DatasetFormat>,
    pub skip_invalid: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET.into(),
            cache_path: Some(DEFAULT_CACHE.into()),
            release_url: DEFAULT_RELEASE_URL.to_string(),
            asset_name: DEFAULT_ASSET.to_string(),
            format: None,
            skip_invalid: false,
        }
    }
}

impl Config {
    /// Reads `JMFURIGANA_*` variables, falling back to the defaults.
    pub fn from_env() -> DataResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DataResult<Self> {
        let mut config = Self::default();
        if let Some(dataset) = lookup("JMFURIGANA_DATASET") {
            config.dataset_path = dataset.into();
        }
        if let Some(cache) = lookup("JMFURIGANA_CACHE") {
            // an empty value turns the cache off
            config.cache_path = Some(cache).filter(|c| !c.is_empty()).map(PathBuf::from);
        }
        if let Some(release_url) = lookup("JMFURIGANA_RELEASE_URL") {
            config.release_url = release_url;
        }
        if let Some(asset_name) = lookup("JMFURIGANA_ASSET") {
            config.asset_name = asset_name;
        }
        if let Some(format) = lookup("JMFURIGANA_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "text" | "txt" => Some(DatasetFormat::Text),
                "json" => Some(DatasetFormat::Json),
                "" => None,
                other => {
                    return Err(DataError::Config(format!(
                        "JMFURIGANA_FORMAT must be 'text' or 'json', got '{other}'"
                    )))
                }
            };
        }
        if let Some(skip_invalid) = lookup("JMFURIGANA_SKIP_INVALID") {
            config.skip_invalid = matches!(skip_invalid.as_str(), "1" | "true" | "yes");
        }
        Ok(config)
    }
}
