//! Disk mirror of remote video content
//!
//! Files are named by the hex SHA-256 of their source URL. There is no
//! eviction and no size bound. Each download streams into its own temporary
//! file in the cache directory that is renamed into place once complete, so a
//! lookup never sees a partial file. Two downloads of the same URL are not
//! coordinated; the last rename wins. A failed download removes its
//! temporary file.

use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::{Client, Url};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Where a video should be played from
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackSource {
    /// Already mirrored on disk
    Cached(PathBuf),
    /// Not cached yet; play from the network
    Remote(Url),
}

/// Content-addressed video cache rooted at a directory
#[derive(Debug, Clone)]
pub struct VideoCache {
    cache_dir: PathBuf,
    client: Client,
}

impl VideoCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self::with_client(cache_dir, Client::new())
    }

    pub fn with_client(cache_dir: impl Into<PathBuf>, client: Client) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            client,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path a URL is mirrored to
    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(cache_key(url))
    }

    /// Whether the URL has a complete mirrored file
    pub async fn is_cached(&self, url: &str) -> bool {
        fs::try_exists(self.cache_path(url)).await.unwrap_or(false)
    }

    /// Resolve where to play `url` from.
    ///
    /// A cached file is returned as is. Otherwise the remote URL is returned
    /// and a background download into the cache is started; its handle is
    /// returned so callers may await or drop it. `None` for an unparseable URL.
    pub async fn playback_source(&self, url: &str) -> Option<(PlaybackSource, Option<JoinHandle<()>>)> {
        let path = self.cache_path(url);
        if fs::try_exists(&path).await.unwrap_or(false) {
            debug!("Cache hit for {}", url);
            return Some((PlaybackSource::Cached(path), None));
        }

        let remote = match Url::parse(url) {
            Ok(remote) => remote,
            Err(e) => {
                warn!("Not caching invalid video URL {}: {}", url, e);
                return None;
            }
        };

        let cache = self.clone();
        let source = remote.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = cache.download(source.as_str()).await {
                warn!("Failed to cache video: {:#}", e);
            }
        });

        Some((PlaybackSource::Remote(remote), Some(handle)))
    }

    /// Download `url` into the cache and return the mirrored path
    pub async fn download(&self, url: &str) -> Result<PathBuf> {
        let destination = self.cache_path(url);

        fs::create_dir_all(&self.cache_dir)
            .await
            .with_context(|| format!("Failed to create cache directory {:?}", self.cache_dir))?;

        debug!("Caching {} -> {:?}", url, destination);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        // Removed on drop unless persisted
        let (file, partial) = tempfile::Builder::new()
            .prefix(".download-")
            .suffix(".part")
            .tempfile_in(&self.cache_dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", self.cache_dir))?
            .into_parts();

        let mut writer = BufWriter::new(File::from_std(file));
        let mut downloaded = 0u64;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
        }
        writer.flush().await?;
        drop(writer);

        partial
            .persist(&destination)
            .with_context(|| format!("Failed to move download into {:?}", destination))?;

        info!("Cached {} ({} bytes)", url, downloaded);
        Ok(destination)
    }

    /// Remove every mirrored file
    pub async fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.cache_dir).await {
            Ok(()) => {
                info!("Cleared video cache at {:?}", self.cache_dir);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to clear video cache"),
        }
    }
}

/// Content address of a source URL
pub fn cache_key(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}
