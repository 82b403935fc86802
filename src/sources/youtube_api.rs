use crate::core::enrich::enrich_all;
use crate::core::{AggregateError, ChannelIdentifier, RankedVideo, Result, VideoSource};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

/// Client for the official YouTube Data API v3.
///
/// Every call needs an API key; without one the source fails with
/// [`AggregateError::MissingCredential`] before touching the network.
pub struct YouTubeApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubeApi {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(AggregateError::MissingCredential)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let key = self.key()?;
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("YouTube API request: {} {:?}", endpoint, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AggregateError::upstream(
                Some(status.as_u16()),
                format!(
                    "YouTube API {} returned HTTP {}: {}",
                    endpoint,
                    status,
                    api_error_message(&body)
                ),
            ));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Pull `error.message` out of a Data API error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[async_trait]
impl VideoSource for YouTubeApi {
    fn name(&self) -> &'static str {
        "youtube-data-api"
    }

    async fn fetch_channel_videos(
        &self,
        identifier: &ChannelIdentifier,
        max_videos: usize,
    ) -> Result<Vec<RankedVideo>> {
        self.key()?;

        let channel_id = self.resolve_channel(identifier).await?;
        let videos = self.list_videos(&channel_id, max_videos).await?;
        info!("Listed {} videos for channel {}", videos.len(), channel_id);

        let enriched = enrich_all(videos, |id| async move { self.video_stats(&id).await }).await;
        Ok(enriched.videos)
    }
}

// Wire types. Only the fields we read are declared.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: SearchId,
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchId {
    pub channel_id: Option<String>,
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    #[serde(default)]
    pub title: String,
    pub custom_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelItem {
    pub id: String,
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoItem {
    #[serde(default)]
    pub statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}
