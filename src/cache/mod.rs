//! Video content cache module

pub mod video_cache;

pub use video_cache::{cache_key, PlaybackSource, VideoCache};
