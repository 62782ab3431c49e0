// src/download.rs
// =============================================================================
// The Downloader: saves one asset into the output directory.
//
// File naming:
//   The file is named after the last path segment of the asset URL, with the
//   query string already stripped. "https://x.test/img/c.png" -> "c.png".
//   A URL whose last segment is empty ("https://x.test/", ".../gallery/")
//   has no usable name; such assets are skipped with NoFileName and never
//   fetched. Two assets with the same name overwrite each other.
// =============================================================================

use crate::error::DownloadError;
use crate::fetch::Fetch;
use serde::Serialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Where an asset ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedAsset {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Last path segment of `url`, or None when it is empty.
pub fn asset_file_name(url: &Url) -> Option<String> {
    let name = url.path_segments()?.last()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Fetches `url` and writes it to `dir/<last path segment>`.
///
/// No size or content-type checks are made; whatever the server returns is
/// written as-is.
pub async fn download_asset(
    fetcher: &dyn Fetch,
    url: &Url,
    dir: &Path,
) -> Result<SavedAsset, DownloadError> {
    let name = asset_file_name(url).ok_or_else(|| DownloadError::NoFileName {
        url: url.to_string(),
    })?;

    let bytes = fetcher.fetch_bytes(url).await?;

    let path = dir.join(name);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| DownloadError::Write {
            path: path.clone(),
            source,
        })?;

    Ok(SavedAsset {
        path,
        bytes: bytes.len(),
    })
}
