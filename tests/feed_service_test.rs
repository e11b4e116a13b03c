//! Feed service against a mock search API.

use serde_json::json;
use shortfeed::feed::{FeedService, VideoRecord, VideoSource};
use shortfeed::{AppSettings, FetchError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> AppSettings {
    AppSettings {
        api_url: format!("{}/videos/search", server.uri()),
        api_key: Some("test-key".to_string()),
        query: "people".to_string(),
        per_page: 2,
        ..Default::default()
    }
}

fn sample_page() -> serde_json::Value {
    json!({
        "page": 1,
        "per_page": 2,
        "total_results": 1000,
        "next_page": "https://api.pexels.com/videos/search?page=2",
        "videos": [
            {
                "id": 123,
                "width": 1080,
                "height": 1920,
                "duration": 30,
                "image": "https://x/t.jpg",
                "user": {"id": 1, "name": "John Doe", "url": "https://x/u/1"},
                "video_files": [
                    {"id": 10, "quality": "sd", "file_type": "video/mp4", "width": 540, "fps": 25.0, "link": "https://x/sd.mp4"},
                    {"id": 11, "quality": "hd", "file_type": "video/mp4", "width": 1080, "fps": 29.97, "link": "https://x/hd.mp4"}
                ]
            },
            {
                "id": 45,
                "duration": 12,
                "image": {"medium": "https://x/m.jpg"},
                "user": {"id": 2},
                "video_files": []
            }
        ]
    })
}

#[tokio::test]
async fn fetch_page_sends_query_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .and(query_param("query", "people"))
        .and(query_param("per_page", "2"))
        .and(query_param("page", "3"))
        .and(header("Authorization", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page()))
        .expect(1)
        .mount(&server)
        .await;

    let service = FeedService::new(&settings_for(&server)).expect("service");
    let videos = service.fetch_page(3, 2).await.expect("page");

    assert_eq!(
        videos,
        vec![
            VideoRecord::new(123, "https://x/hd.mp4", "https://x/t.jpg", "John Doe", 30),
            VideoRecord::new(45, "", "https://x/m.jpg", "Unknown", 12),
        ]
    );
}

#[tokio::test]
async fn fetch_videos_uses_configured_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": []})))
        .expect(1)
        .mount(&server)
        .await;

    let service = FeedService::new(&settings_for(&server)).expect("service");
    assert!(service.fetch_videos().await.expect("page").is_empty());
}

#[tokio::test]
async fn fetch_videos_honors_configured_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": []})))
        .expect(1)
        .mount(&server)
        .await;

    let settings = AppSettings {
        page: 3,
        ..settings_for(&server)
    };
    let service = FeedService::new(&settings).expect("service");
    assert_eq!(service.first_page(), 3);
    assert!(service.fetch_videos().await.expect("page").is_empty());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let service = FeedService::new(&settings_for(&server)).expect("service");
    let err = service.fetch_page(1, 2).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(status) if status.as_u16() == 401));
}

#[tokio::test]
async fn empty_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let service = FeedService::new(&settings_for(&server)).expect("service");
    let err = service.fetch_page(1, 2).await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyResponse));
}

#[tokio::test]
async fn malformed_item_fails_the_whole_page() {
    let server = MockServer::start().await;
    let body = json!({
        "videos": [
            {"id": 1, "duration": 3, "video_files": []},
            {"id": 2, "video_files": []}
        ]
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let service = FeedService::new(&settings_for(&server)).expect("service");
    let err = service.fetch_page(1, 2).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let server = MockServer::start().await;
    let settings = settings_for(&server);
    drop(server);

    let service = FeedService::new(&settings).expect("service");
    let err = service.fetch_page(1, 2).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
