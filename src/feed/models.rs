//! Data structures for feed records

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Upstream video identifier
pub type VideoId = i64;

/// Normalized video record served to the feed and profile screens
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: VideoId,
    pub video_url: String,
    pub thumbnail_url: String,
    pub username: String,
    /// Length in seconds
    pub duration: i64,
    /// Only set locally; never populated from the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl VideoRecord {
    pub fn new(
        id: VideoId,
        video_url: impl Into<String>,
        thumbnail_url: impl Into<String>,
        username: impl Into<String>,
        duration: i64,
    ) -> Self {
        Self {
            id,
            video_url: video_url.into(),
            thumbnail_url: thumbnail_url.into(),
            username: username.into(),
            duration,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Scalar value of a loosely typed JSON field.
///
/// The upstream schema mixes strings, numbers and booleans in objects such as
/// `user` and the variant entries. Anything else (null, arrays, nested
/// objects) collapses to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonScalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl JsonScalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonScalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for JsonScalar {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => JsonScalar::String(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => JsonScalar::Integer(i),
                None => JsonScalar::Float(n.as_f64().unwrap_or_default()),
            },
            Value::Bool(b) => JsonScalar::Bool(b),
            _ => JsonScalar::String(String::new()),
        }
    }
}

impl<'de> Deserialize<'de> for JsonScalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(JsonScalar::from)
    }
}

/// One quality-tagged rendition as listed in `video_files`
pub type RawVariant = HashMap<String, JsonScalar>;

/// Video item exactly as the search API returns it.
///
/// `id`, `duration` and `video_files` are strict. `image` and `user` are kept
/// as raw JSON and sniffed by the decoder.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVideo {
    pub id: VideoId,
    pub duration: i64,
    pub video_files: Vec<RawVariant>,
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub user: Option<Value>,
}

/// Search response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub next_page: Option<String>,
    pub videos: Vec<Value>,
}
