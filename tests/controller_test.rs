//! Feed and profile controllers driven by a canned video source.

use async_trait::async_trait;
use shortfeed::controller::{FeedController, ProfileController, UserProfile};
use shortfeed::database::MemoryBackend;
use shortfeed::feed::{VideoRecord, VideoSource};
use shortfeed::likes::LikeStore;
use shortfeed::FetchError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Source replaying scripted pages and recording the pages requested
#[derive(Default)]
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<VideoRecord>, FetchError>>>,
    requested: Mutex<Vec<(u32, u32)>>,
    first_page: u32,
}

impl ScriptedSource {
    fn push(&self, response: Result<Vec<VideoRecord>, FetchError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn requested(&self) -> Vec<(u32, u32)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSource for ScriptedSource {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<VideoRecord>, FetchError> {
        self.requested.lock().unwrap().push((page, per_page));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::EmptyResponse))
    }

    fn default_per_page(&self) -> u32 {
        3
    }

    fn first_page(&self) -> u32 {
        self.first_page.max(1)
    }
}

fn videos(ids: &[i64]) -> Vec<VideoRecord> {
    ids.iter()
        .map(|&id| VideoRecord::new(id, format!("https://x/{id}.mp4"), "", "user", 10))
        .collect()
}

fn setup() -> (FeedController, Arc<ScriptedSource>, LikeStore) {
    let source = Arc::new(ScriptedSource::default());
    let likes = LikeStore::new(Arc::new(MemoryBackend::new()));
    let controller = FeedController::new(source.clone(), likes.clone());
    (controller, source, likes)
}

#[tokio::test]
async fn load_videos_replaces_records() {
    let (mut controller, source, _) = setup();
    source.push(Ok(videos(&[1, 2, 3])));

    controller.load_videos().await;

    assert!(!controller.is_loading());
    assert!(controller.error().is_none());
    assert_eq!(controller.videos().len(), 3);
    assert_eq!(source.requested(), vec![(1, 3)]);
}

#[tokio::test]
async fn failed_load_keeps_error_until_retry() {
    let (mut controller, source, _) = setup();
    source.push(Err(FetchError::InvalidRequest("bad url".to_string())));
    source.push(Ok(videos(&[4])));

    controller.load_videos().await;
    assert!(matches!(controller.error(), Some(FetchError::InvalidRequest(_))));
    assert!(controller.videos().is_empty());
    assert!(!controller.is_loading());

    controller.retry_loading().await;
    assert!(controller.error().is_none());
    assert_eq!(controller.videos()[0].id, 4);
}

#[tokio::test]
async fn load_more_appends_unseen_records() {
    let (mut controller, source, _) = setup();
    source.push(Ok(videos(&[1, 2, 3])));
    source.push(Ok(videos(&[3, 4, 5])));

    controller.load_videos().await;
    let added = controller.load_more().await;

    assert_eq!(added, 2);
    let ids: Vec<_> = controller.videos().iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(source.requested(), vec![(1, 3), (2, 3)]);
}

#[tokio::test]
async fn failed_load_more_does_not_advance_page() {
    let (mut controller, source, _) = setup();
    source.push(Ok(videos(&[1])));
    source.push(Err(FetchError::EmptyResponse));
    source.push(Ok(videos(&[2])));

    controller.load_videos().await;
    assert_eq!(controller.load_more().await, 0);
    assert!(controller.error().is_some());

    assert_eq!(controller.load_more().await, 1);
    assert_eq!(source.requested(), vec![(1, 3), (2, 3), (2, 3)]);
}

#[tokio::test]
async fn load_more_continues_after_configured_first_page() {
    let source = Arc::new(ScriptedSource {
        first_page: 3,
        ..Default::default()
    });
    source.push(Ok(videos(&[1])));
    source.push(Ok(videos(&[2])));
    let mut controller =
        FeedController::new(source.clone(), LikeStore::new(Arc::new(MemoryBackend::new())));

    controller.load_videos().await;
    controller.load_more().await;

    assert_eq!(source.requested(), vec![(3, 3), (4, 3)]);
}

#[tokio::test]
async fn likes_are_shared_with_profile() {
    let (mut controller, source, likes) = setup();
    source.push(Ok(videos(&[1, 2, 3, 4])));
    controller.load_videos().await;

    let first = controller.videos()[0].clone();
    let second = controller.videos()[1].clone();
    controller.toggle_like(&first).await;
    controller.toggle_like(&second).await;
    assert!(controller.is_liked(&first).await);
    assert_eq!(controller.like_count(&second).await, 1);

    let mut profile =
        ProfileController::new(likes, UserProfile::new("johndoe")).with_grid_size(2);
    profile.load_profile(controller.videos()).await;

    assert_eq!(profile.user().video_count, 4);
    assert_eq!(profile.user().total_likes, 2);
    assert_eq!(profile.user_videos().len(), 2);
}
