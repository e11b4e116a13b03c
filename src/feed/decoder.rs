//! Normalization of raw search-API video items into [`VideoRecord`]s

use crate::feed::models::{FeedResponse, JsonScalar, RawVariant, RawVideo, VideoRecord};
use crate::utils::error::DecodeError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Preferred variant quality tag
pub const PREFERRED_QUALITY: &str = "hd";

/// Username used when the author object carries no string `name`
pub const UNKNOWN_USERNAME: &str = "Unknown";

/// Shapes observed for the `image` field
#[derive(Deserialize)]
#[serde(untagged)]
enum ImageShape {
    Url(String),
    Sizes(HashMap<String, String>),
}

/// Decode one raw JSON video object.
pub fn decode_video(value: Value) -> Result<VideoRecord, DecodeError> {
    let raw: RawVideo = serde_json::from_value(value)?;
    Ok(normalize(raw))
}

/// Decode one video object from JSON text.
pub fn decode_video_str(json: &str) -> Result<VideoRecord, DecodeError> {
    let raw: RawVideo = serde_json::from_str(json)?;
    Ok(normalize(raw))
}

/// Decode every item of a search response body.
///
/// The page fails as a whole on the first malformed item, in server order.
pub fn decode_feed(body: &[u8]) -> Result<Vec<VideoRecord>, DecodeError> {
    let response: FeedResponse = serde_json::from_slice(body)?;
    debug!(
        "Feed page {:?} ({:?} per page, {:?} total, next: {:?})",
        response.page, response.per_page, response.total_results, response.next_page
    );

    response.videos.into_iter().map(decode_video).collect()
}

fn normalize(raw: RawVideo) -> VideoRecord {
    VideoRecord {
        id: raw.id,
        video_url: resolve_video_url(&raw.video_files),
        thumbnail_url: raw.image.map(resolve_thumbnail_url).unwrap_or_default(),
        username: raw
            .user
            .map(resolve_username)
            .unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
        duration: raw.duration,
        caption: None,
    }
}

/// First `hd` variant's link, else the first variant's link, else `""`.
pub fn resolve_video_url(variants: &[RawVariant]) -> String {
    let link = |variant: &RawVariant| {
        variant
            .get("link")
            .and_then(JsonScalar::as_str)
            .map(str::to_owned)
    };

    variants
        .iter()
        .find(|v| v.get("quality").and_then(JsonScalar::as_str) == Some(PREFERRED_QUALITY))
        .and_then(link)
        .or_else(|| variants.first().and_then(link))
        .unwrap_or_default()
}

/// Bare URL string, else the `large` then `medium` size, else `""`.
pub fn resolve_thumbnail_url(image: Value) -> String {
    match serde_json::from_value::<ImageShape>(image) {
        Ok(ImageShape::Url(url)) => url,
        Ok(ImageShape::Sizes(mut sizes)) => sizes
            .remove("large")
            .or_else(|| sizes.remove("medium"))
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// String `name` of the author object, else [`UNKNOWN_USERNAME`].
pub fn resolve_username(user: Value) -> String {
    serde_json::from_value::<HashMap<String, JsonScalar>>(user)
        .ok()
        .and_then(|mut fields| match fields.remove("name") {
            Some(JsonScalar::String(name)) => Some(name),
            _ => None,
        })
        .unwrap_or_else(|| UNKNOWN_USERNAME.to_string())
}
