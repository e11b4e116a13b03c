pub mod decoder;
pub mod models;
pub mod service;
pub mod source;

pub use decoder::{decode_feed, decode_video, decode_video_str};
pub use models::{JsonScalar, VideoId, VideoRecord};
pub use service::FeedService;
pub use source::VideoSource;
