//! shortfeed library
//!
//! Short-video feed client: decodes the Pexels video search response into
//! normalized records, persists likes locally and mirrors video content to
//! disk.

pub mod cache;
pub mod controller;
pub mod database;
pub mod feed;
pub mod likes;
pub mod utils;

// Re-export main types for easier use
pub use cache::{PlaybackSource, VideoCache};
pub use controller::{FeedController, ProfileController, UserProfile};
pub use database::{KeyValueBackend, MemoryBackend, SqliteBackend};
pub use feed::{FeedService, VideoRecord, VideoSource};
pub use likes::{LikeState, LikeStore};
pub use utils::{AppSettings, DecodeError, FetchError, StoreError};
