//! Platform path resolution
//!
//! All default locations are absolute and resolved through `dirs`, so they
//! do not depend on the working directory the binary was launched from:
//! - Application data: `<data dir>/ShortFeed/` (holds the like database)
//! - Video cache: `<cache dir>/ShortFeed/VideoCache/`
//!
//! Nothing here touches the filesystem. The database and the cache create
//! their directories when first written.

use std::path::PathBuf;
use tracing::debug;

const APP_DIR_NAME: &str = "ShortFeed";

/// Get the application data directory.
pub fn get_app_data_dir() -> PathBuf {
    let dir = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME);

    debug!("App data directory: {:?}", dir);
    dir
}

/// Get the database path.
///
/// Returns: `<data dir>/ShortFeed/shortfeed.db`
pub fn get_database_path() -> PathBuf {
    get_app_data_dir().join("shortfeed.db")
}

/// Get the directory where remote video content is mirrored.
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join("VideoCache")
}
