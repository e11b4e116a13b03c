//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::paths::{get_cache_dir, get_database_path};

/// Pexels video search endpoint
pub const DEFAULT_API_URL: &str = "https://api.pexels.com/videos/search";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Video search endpoint
    pub api_url: String,

    /// API key sent in the `Authorization` header
    pub api_key: Option<String>,

    /// Free-text search query
    pub query: String,

    /// First page requested by `fetch_videos`
    pub page: u32,

    /// Records per page
    pub per_page: u32,

    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// Records kept around the current index on each side
    pub window_radius: usize,

    /// Number of records shown on the profile grid
    pub profile_grid_size: usize,

    /// Name shown on the profile
    pub profile_username: String,

    /// SQLite database holding the like store
    pub database_path: PathBuf,

    /// Directory mirroring remote video content
    pub cache_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            query: "people".to_string(),
            page: 1,
            per_page: 80,
            timeout_secs: 30,
            window_radius: 2,
            profile_grid_size: 12,
            profile_username: "johndoe".to_string(),
            database_path: get_database_path(),
            cache_dir: get_cache_dir(),
        }
    }
}

impl AppSettings {
    /// Load settings from an optional JSON file, then apply environment
    /// overrides and clamp to sane minimums.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                debug!("Loading settings from {:?}", path);
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings file {:?}", path))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse settings file {:?}", path))?
            }
            None => Self::default(),
        };

        Ok(settings.with_env_overrides().validated())
    }

    /// Apply `SHORTFEED_*` environment variables
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_var("SHORTFEED_API_KEY").or_else(|| env_var("PEXELS_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(query) = env_var("SHORTFEED_QUERY") {
            self.query = query;
        }
        if let Some(url) = env_var("SHORTFEED_API_URL") {
            self.api_url = url;
        }
        self
    }

    /// Enforce sane minimums
    pub fn validated(mut self) -> Self {
        self.page = self.page.max(1);
        self.per_page = self.per_page.max(1);
        self.profile_grid_size = self.profile_grid_size.max(1);
        self.timeout_secs = self.timeout_secs.max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
