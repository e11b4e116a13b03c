use crate::feed::models::VideoRecord;
use crate::utils::error::FetchError;
use async_trait::async_trait;

/// Core trait for anything that can supply pages of the feed
///
/// This isolates the controllers from the concrete upstream API so they can
/// be driven by a canned source in tests.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Returns a short identifier for logging (e.g., "pexels")
    fn id(&self) -> &'static str;

    /// Fetches a single page. One round trip, no retry.
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<VideoRecord>, FetchError>;

    /// Page size used by [`VideoSource::fetch_videos`]
    fn default_per_page(&self) -> u32 {
        80
    }

    /// Page requested by [`VideoSource::fetch_videos`]
    fn first_page(&self) -> u32 {
        1
    }

    /// Fetches the first page of the feed
    async fn fetch_videos(&self) -> Result<Vec<VideoRecord>, FetchError> {
        self.fetch_page(self.first_page(), self.default_per_page()).await
    }
}
