//! Error type for loading the dataset.

use std::{io, path::PathBuf};
use thiserror::Error;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error(
        "No furigana data found: neither the dataset at '{}' nor a cache exists. \
         Download JmdictFurigana.txt or JmdictFurigana.json from \
         https://github.com/Doublevil/JmdictFurigana/releases, or run the `fetch` command.",
        .dataset.display()
    )]
    MissingDataset {
        dataset: PathBuf,
        cache: Option<PathBuf>,
    },
    #[error("Failed to access '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Request to '{url}' failed")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("Unexpected release information: {0}")]
    Release(String),
    #[error("Invalid line {number} in cache '{}'", .path.display())]
    Cache {
        path: PathBuf,
        number: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to parse dataset '{}'", .path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: jmfurigana::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
