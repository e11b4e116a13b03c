//! Persisted like state per video
//!
//! Two keys are owned here: the liked-set (JSON array of ids) and the counter
//! map (JSON object of id -> count). A toggle reads both, flips the state,
//! and writes both back in one `set_many` call.

use crate::database::KeyValueBackend;
use crate::feed::models::VideoId;
use crate::utils::error::StoreError;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key of the liked-set
pub const LIKES_KEY: &str = "video_likes";

/// Storage key of the counter map
pub const COUNTS_KEY: &str = "like_counts";

/// Like state of a single video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeState {
    pub liked: bool,
    pub count: u64,
}

/// Like store bound to a key-value backend
#[derive(Clone)]
pub struct LikeStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl LikeStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Flip the like state of `id` and persist it.
    ///
    /// A failed write is logged and dropped: the returned state is what the
    /// toggle produced, but the store keeps the previous state.
    pub async fn toggle_like(&self, id: VideoId) -> LikeState {
        match self.try_toggle_like(id).await {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to persist like toggle for video {}: {}", id, e);
                let previous = self.like_state(id).await;
                LikeState {
                    liked: !previous.liked,
                    count: next_count(previous.liked, previous.count),
                }
            }
        }
    }

    /// Flip the like state of `id`, surfacing persistence failures
    pub async fn try_toggle_like(&self, id: VideoId) -> Result<LikeState, StoreError> {
        // Writing back after a failed read would replace every other entry
        let mut likes: BTreeSet<VideoId> = self.read(LIKES_KEY).await?;
        let mut counts: BTreeMap<VideoId, u64> = self.read(COUNTS_KEY).await?;

        let was_liked = likes.contains(&id);
        if was_liked {
            likes.remove(&id);
        } else {
            likes.insert(id);
        }

        // A liked id without a counter unlikes down to zero
        let current = counts.get(&id).copied().unwrap_or(u64::from(was_liked));
        let count = next_count(was_liked, current);
        counts.insert(id, count);

        let likes_blob = serde_json::to_vec(&likes)?;
        let counts_blob = serde_json::to_vec(&counts)?;
        self.backend
            .set_many(&[
                (LIKES_KEY, likes_blob.as_slice()),
                (COUNTS_KEY, counts_blob.as_slice()),
            ])
            .await?;

        let state = LikeState {
            liked: !was_liked,
            count,
        };
        debug!("Video {} is now {:?}", id, state);
        Ok(state)
    }

    pub async fn is_liked(&self, id: VideoId) -> bool {
        self.liked_ids().await.contains(&id)
    }

    pub async fn like_count(&self, id: VideoId) -> u64 {
        self.like_counts().await.get(&id).copied().unwrap_or(0)
    }

    pub async fn like_state(&self, id: VideoId) -> LikeState {
        LikeState {
            liked: self.is_liked(id).await,
            count: self.like_count(id).await,
        }
    }

    /// Sum of all persisted counters
    pub async fn total_likes(&self) -> u64 {
        self.like_counts().await.values().sum()
    }

    /// Ids currently marked as liked
    pub async fn liked_ids(&self) -> BTreeSet<VideoId> {
        self.load(LIKES_KEY).await
    }

    async fn like_counts(&self) -> BTreeMap<VideoId, u64> {
        self.load(COUNTS_KEY).await
    }

    /// Missing, unreadable or corrupt values read as empty
    async fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.read(key).await.unwrap_or_else(|e| {
            warn!("Failed to read {}: {}", key, e);
            T::default()
        })
    }

    /// Missing or corrupt values read as empty; backend failures are returned
    async fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StoreError> {
        let Some(blob) = self.backend.get(key).await? else {
            return Ok(T::default());
        };

        Ok(serde_json::from_slice(&blob).unwrap_or_else(|e| {
            warn!("Ignoring corrupt value under {}: {}", key, e);
            T::default()
        }))
    }
}

fn next_count(liked: bool, count: u64) -> u64 {
    if liked {
        count.saturating_sub(1)
    } else {
        count.saturating_add(1)
    }
}
