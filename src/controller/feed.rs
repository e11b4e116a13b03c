//! Feed screen state: loaded records, current position and like actions

use crate::feed::{VideoRecord, VideoSource};
use crate::likes::{LikeState, LikeStore};
use crate::utils::error::FetchError;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Default number of records kept around the current one on each side
pub const DEFAULT_WINDOW_RADIUS: usize = 2;

/// Drives one feed screen. Owned by a single caller; every mutation takes
/// `&mut self`.
pub struct FeedController {
    source: Arc<dyn VideoSource>,
    likes: LikeStore,
    videos: Vec<VideoRecord>,
    is_loading: bool,
    error: Option<FetchError>,
    current_index: usize,
    window_radius: usize,
    last_page: Option<u32>,
}

impl FeedController {
    pub fn new(source: Arc<dyn VideoSource>, likes: LikeStore) -> Self {
        Self {
            source,
            likes,
            videos: Vec::new(),
            is_loading: false,
            error: None,
            current_index: 0,
            window_radius: DEFAULT_WINDOW_RADIUS,
            last_page: None,
        }
    }

    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.window_radius = radius;
        self
    }

    /// Replace the held records with the first page of the feed.
    ///
    /// On failure the previous records are kept and the error is recorded.
    pub async fn load_videos(&mut self) {
        self.is_loading = true;
        self.error = None;

        match self.source.fetch_videos().await {
            Ok(videos) => {
                info!("Loaded {} videos from {}", videos.len(), self.source.id());
                self.videos = videos;
                self.current_index = 0;
                self.last_page = Some(self.source.first_page());
            }
            Err(e) => {
                error!("Failed to load videos: {}", e);
                self.error = Some(e);
            }
        }

        self.is_loading = false;
    }

    /// Manual retry after a failed load
    pub async fn retry_loading(&mut self) {
        self.load_videos().await;
    }

    /// Fetch the page after the last one loaded and append records not
    /// already held. Returns how many records were added.
    pub async fn load_more(&mut self) -> usize {
        let page = self.last_page.map_or(1, |p| p + 1);
        self.is_loading = true;
        self.error = None;

        let added = match self
            .source
            .fetch_page(page, self.source.default_per_page())
            .await
        {
            Ok(videos) => {
                let known: HashSet<_> = self.videos.iter().map(|v| v.id).collect();
                let before = self.videos.len();
                self.videos
                    .extend(videos.into_iter().filter(|v| !known.contains(&v.id)));
                self.last_page = Some(page);
                let added = self.videos.len() - before;
                debug!("Page {} added {} new videos", page, added);
                added
            }
            Err(e) => {
                error!("Failed to load page {}: {}", page, e);
                self.error = Some(e);
                0
            }
        };

        self.is_loading = false;
        added
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    /// Replace the held records directly
    pub fn set_videos(&mut self, videos: Vec<VideoRecord>) {
        self.videos = videos;
        self.current_index = self.current_index.min(self.videos.len().saturating_sub(1));
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Move to `index`, clamped to the last record
    pub fn set_current_index(&mut self, index: usize) {
        self.current_index = index.min(self.videos.len().saturating_sub(1));
    }

    /// Indices of the records worth keeping alive around the current one
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.current_index.saturating_sub(self.window_radius);
        let end = (self.current_index + self.window_radius + 1).min(self.videos.len());
        start..end.max(start)
    }

    pub fn visible_videos(&self) -> &[VideoRecord] {
        &self.videos[self.visible_range()]
    }

    pub async fn toggle_like(&self, video: &VideoRecord) -> LikeState {
        self.likes.toggle_like(video.id).await
    }

    pub async fn is_liked(&self, video: &VideoRecord) -> bool {
        self.likes.is_liked(video.id).await
    }

    pub async fn like_count(&self, video: &VideoRecord) -> u64 {
        self.likes.like_count(video.id).await
    }
}
