//! Pexels video search client
//!
//! Performs exactly one GET per page and hands the body to the decoder.

use crate::feed::decoder::decode_feed;
use crate::feed::models::VideoRecord;
use crate::feed::source::VideoSource;
use crate::utils::config::AppSettings;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Url};
use tracing::{debug, error, info};

/// Feed client for the video search API
pub struct FeedService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    query: String,
    first_page: u32,
    per_page: u32,
}

impl FeedService {
    /// Build a client from application settings
    pub fn new(settings: &AppSettings) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            base_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            query: settings.query.clone(),
            first_page: settings.page,
            per_page: settings.per_page,
        })
    }

    /// Build the request URL for a page
    pub fn page_url(&self, page: u32, per_page: u32) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidRequest(format!("{}: {}", self.base_url, e)))?;

        if url.cannot_be_a_base() {
            return Err(FetchError::InvalidRequest(self.base_url.clone()));
        }

        url.query_pairs_mut()
            .append_pair("query", &self.query)
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());

        Ok(url)
    }
}

#[async_trait]
impl VideoSource for FeedService {
    fn id(&self) -> &'static str {
        "pexels"
    }

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<VideoRecord>, FetchError> {
        let url = self.page_url(page, per_page)?;
        info!("Fetching: {}", url);

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, key);
        }

        let response = request.send().await.map_err(|e| {
            error!("Network error: {}", e);
            FetchError::Transport(e)
        })?;

        let status = response.status();
        debug!("Status: {}", status);
        if !status.is_success() {
            error!("Feed request rejected with status {}", status);
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        debug!("Data size: {} bytes", body.len());
        if body.is_empty() {
            return Err(FetchError::EmptyResponse);
        }

        let records = decode_feed(&body).map_err(|e| {
            error!("Decoding error: {}", e);
            FetchError::Decode(e)
        })?;

        info!("Parsed {} videos", records.len());
        Ok(records)
    }

    fn default_per_page(&self) -> u32 {
        self.per_page
    }

    fn first_page(&self) -> u32 {
        self.first_page
    }
}
