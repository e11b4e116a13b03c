//! Profile screen state

use crate::feed::VideoRecord;
use crate::likes::LikeStore;
use rand::seq::SliceRandom;
use rand::Rng;

/// Default number of records on the profile grid
pub const DEFAULT_GRID_SIZE: usize = 12;

/// Local user shown on the profile screen
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub username: String,
    pub avatar: Option<String>,
    pub video_count: usize,
    pub total_likes: u64,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            avatar: None,
            video_count: 0,
            total_likes: 0,
        }
    }
}

pub struct ProfileController {
    likes: LikeStore,
    user: UserProfile,
    user_videos: Vec<VideoRecord>,
    grid_size: usize,
}

impl ProfileController {
    pub fn new(likes: LikeStore, user: UserProfile) -> Self {
        Self {
            likes,
            user,
            user_videos: Vec::new(),
            grid_size: DEFAULT_GRID_SIZE,
        }
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Fill the grid with a random sample of `all_videos` and update stats
    pub async fn load_profile(&mut self, all_videos: &[VideoRecord]) {
        self.fill_grid(all_videos, &mut rand::thread_rng());
        self.refresh_stats().await;
    }

    /// Pick up to the grid size of distinct records and count the feed
    pub fn fill_grid<R: Rng + ?Sized>(&mut self, all_videos: &[VideoRecord], rng: &mut R) {
        self.user_videos = all_videos
            .choose_multiple(rng, self.grid_size)
            .cloned()
            .collect();
        self.user.video_count = all_videos.len();
    }

    /// Re-read the like total
    pub async fn refresh_stats(&mut self) {
        self.user.total_likes = self.likes.total_likes().await;
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn user_videos(&self) -> &[VideoRecord] {
        &self.user_videos
    }
}
