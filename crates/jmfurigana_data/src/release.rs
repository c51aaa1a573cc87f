//! Finds and downloads the latest dataset release from GitHub.

use crate::{
    error::{DataError, DataResult},
    file_ok,
};
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};
use ureq::Agent;

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = concat!("jmfurigana/", env!("CARGO_PKG_VERSION"));
const MAX_API_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;
const MAX_DOWNLOAD_SIZE: u64 = 512 * 1024 * 1024;

/// A release asset ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRelease {
    pub url: String,
    pub tag: String,
    /// The asset name suffixed with the release tag, e.g. `JmdictFurigana.txt2.3.1`.
    pub filename: String,
}

#[derive(Debug, Deserialize)]
struct Release {
    assets: Option<Vec<Asset>>,
    tag_name: String,
}

#[derive(Debug, Deserialize)]
struct Asset {
    name: Option<String>,
    browser_download_url: String,
}

fn agent() -> Agent {
    Agent::config_builder()
        .timeout_global(Some(HTTP_TIMEOUT))
        .build()
        .into()
}

fn get(url: &str, limit: u64) -> DataResult<String> {
    let http_err = |source: ureq::Error| DataError::Http {
        url: url.to_string(),
        source: Box::new(source),
    };
    agent()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(http_err)?
        .into_body()
        .with_config()
        .limit(limit)
        .read_to_string()
        .map_err(http_err)
}

/// Queries the GitHub release API at `api_url` for the asset named `asset_name`.
pub fn latest_release(api_url: &str, asset_name: &str) -> DataResult<FileRelease> {
    tracing::info!("fetching release information from {api_url}");
    let body = get(api_url, MAX_API_RESPONSE_SIZE)?;
    find_asset(&body, asset_name)
}

/// Picks the asset named `asset_name` from a GitHub release API response.
pub fn find_asset(body: &str, asset_name: &str) -> DataResult<FileRelease> {
    let release: Release = serde_json::from_str(body)
        .map_err(|err| DataError::Release(format!("failed to parse release: {err}")))?;
    let assets = release
        .assets
        .ok_or_else(|| DataError::Release("release has no `assets`".to_string()))?;
    let asset = assets
        .into_iter()
        .find(|a| a.name.as_deref() == Some(asset_name))
        .ok_or_else(|| {
            DataError::Release(format!(
                "release {} has no asset named '{asset_name}'",
                release.tag_name
            ))
        })?;

    Ok(FileRelease {
        url: asset.browser_download_url,
        filename: format!("{asset_name}{}", release.tag_name),
        tag: release.tag_name,
    })
}

/// Downloads `url` to `path`.
///
/// Without `overwrite`, an existing non-empty file is kept and nothing is downloaded.
/// Returns whether the file was downloaded.
pub fn save_latest(url: &str, path: &Path, overwrite: bool) -> DataResult<bool> {
    if !overwrite && file_ok(path) {
        tracing::info!("keeping existing {}", path.display());
        return Ok(false);
    }
    tracing::info!("downloading {url}");
    let raw = get(url, MAX_DOWNLOAD_SIZE)?;
    fs::write(path, raw).map_err(DataError::io(path))?;
    tracing::info!("saved {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;

    const RELEASE: &str = r#"{
        "tag_name": "2.3.1",
        "assets": [
            {"name": "JmdictFurigana.json", "browser_download_url": "https://github.com/Doublevil/JmdictFurigana/releases/download/2.3.1/JmdictFurigana.json"},
            {"browser_download_url": "https://example.com/unnamed"},
            {"name": "JmdictFurigana.txt", "browser_download_url": "https://github.com/Doublevil/JmdictFurigana/releases/download/2.3.1/JmdictFurigana.txt"}
        ]
    }"#;

    #[test]
    fn finds_named_asset() {
        let release = find_asset(RELEASE, "JmdictFurigana.txt").unwrap();
        assert_eq!(
            release,
            FileRelease {
                url: "https://github.com/Doublevil/JmdictFurigana/releases/download/2.3.1/JmdictFurigana.txt".to_string(),
                tag: "2.3.1".to_string(),
                filename: "JmdictFurigana.txt2.3.1".to_string(),
            }
        );
    }

    #[test]
    fn fails_without_asset() {
        assert!(matches!(
            find_asset(RELEASE, "JmnedictFurigana.txt"),
            Err(DataError::Release(_))
        ));
        assert!(matches!(
            find_asset(r#"{"tag_name": "2.3.1"}"#, "JmdictFurigana.txt"),
            Err(DataError::Release(_))
        ));
        assert!(matches!(
            find_asset(r#"{"message": "Not Found"}"#, "JmdictFurigana.txt"),
            Err(DataError::Release(_))
        ));
    }

    #[test]
    fn keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("JmdictFurigana.txt");
        fs::write(&path, "字|じ|0:じ\n").unwrap();
        // no request is made, so the URL is never resolved
        let downloaded = save_latest("https://invalid.invalid/", &path, false).unwrap();
        assert!(!downloaded);
        assert_eq!(fs::read_to_string(&path).unwrap(), "字|じ|0:じ\n");
    }
}
