use crate::core::enrich::enrich_all;
use crate::core::paging::{collect_pages, Page};
use crate::core::{
    AggregateError, ChannelIdentifier, RankedVideo, Result, VideoSource, VideoStats, VideoSummary,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

/// Read path through a federation of Piped API instances.
///
/// No credential is needed. Instances are tried in the configured order and
/// each attempt runs the whole resolve/list/enrich pipeline against one
/// instance, so results never mix data from two mirrors.
pub struct PipedSource {
    client: Client,
    instances: Vec<String>,
}

impl PipedSource {
    pub fn new(client: Client, instances: Vec<String>) -> Self {
        let instances = instances
            .into_iter()
            .map(|base| base.trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .collect();
        Self { client, instances }
    }

    pub fn instances(&self) -> &[String] {
        &self.instances
    }

    async fn fetch_from_instance(
        &self,
        base: &str,
        identifier: &ChannelIdentifier,
        max_videos: usize,
    ) -> Result<Vec<RankedVideo>> {
        let channel_id = self.resolve_channel(base, identifier).await?;
        let videos = self.list_videos(base, &channel_id, max_videos).await?;
        debug!("{} listed {} videos for {}", base, videos.len(), channel_id);

        let enriched =
            enrich_all(videos, |id| async move { self.video_stats(base, &id).await }).await;
        if enriched.all_failed() {
            return Err(AggregateError::upstream(
                None,
                format!("{} could not provide statistics for any video", base),
            ));
        }
        Ok(enriched.videos)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> Result<T> {
        debug!("Piped request: {} {:?}", url, params);
        let response = self.client.get(url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AggregateError::upstream(
                Some(status.as_u16()),
                format!("Piped request {} returned HTTP {}", url, status),
            ));
        }
        Ok(response.json::<T>().await?)
    }

    /// Direct route for the identifier kind first, then the instance's channel search.
    pub async fn resolve_channel(&self, base: &str, identifier: &ChannelIdentifier) -> Result<String> {
        let direct = match identifier {
            ChannelIdentifier::ChannelId(id) => return Ok(id.clone()),
            ChannelIdentifier::Handle(handle) => format!("{}/@/{}", base, urlencoding::encode(handle)),
            ChannelIdentifier::LegacyCustomPath(name) => {
                format!("{}/c/{}", base, urlencoding::encode(name))
            }
        };

        match self.get_json::<PipedChannelRef>(&direct, &[]).await {
            Ok(channel) if !channel.id.is_empty() => return Ok(channel.id),
            Ok(_) => debug!("{} returned no channel id", direct),
            Err(err) => debug!("Direct lookup {} failed: {}", direct, err),
        }

        self.search_channel(base, identifier.query_text()).await
    }

    async fn search_channel(&self, base: &str, query: &str) -> Result<String> {
        let url = format!("{}/search", base);
        let response: PipedSearch = self
            .get_json(&url, &[("q", query), ("filter", "channels")])
            .await?;

        let channels: Vec<(String, String)> = response
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.url.strip_prefix("/channel/")?.to_string();
                Some((id, item.name))
            })
            .collect();

        channels
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(query))
            .or_else(|| channels.first())
            .map(|(id, _)| id.clone())
            .ok_or_else(|| AggregateError::resolution("channel not found"))
    }

    /// Newest-first channel listing following Piped's `nextpage` cursor.
    pub async fn list_videos(
        &self,
        base: &str,
        channel_id: &str,
        max_videos: usize,
    ) -> Result<Vec<VideoSummary>> {
        collect_pages(max_videos, |token| self.fetch_video_page(base, channel_id, token)).await
    }

    async fn fetch_video_page(&self, base: &str, channel_id: &str, token: Option<String>) -> Result<Page> {
        let page: PipedPage = match token.as_deref() {
            None => self.get_json(&format!("{}/channel/{}", base, channel_id), &[]).await?,
            Some(token) => {
                self.get_json(
                    &format!("{}/nextpage/channel/{}", base, channel_id),
                    &[("nextpage", token)],
                )
                .await?
            }
        };

        let items = page
            .related_streams
            .into_iter()
            .filter(|stream| stream.kind.as_deref().map_or(true, |kind| kind == "stream"))
            .filter_map(|stream| {
                let video_id = video_id_from_watch_path(&stream.url)?;
                Some(VideoSummary {
                    video_id,
                    title: stream.title,
                })
            })
            .collect();

        Ok(Page {
            items,
            next: page.nextpage,
        })
    }

    pub async fn video_stats(&self, base: &str, video_id: &str) -> Result<VideoStats> {
        let url = format!("{}/streams/{}", base, video_id);
        let stream: PipedStreamInfo = self.get_json(&url, &[]).await?;
        Ok(VideoStats::from_signed(stream.views, stream.likes))
    }
}

#[async_trait]
impl VideoSource for PipedSource {
    fn name(&self) -> &'static str {
        "piped"
    }

    async fn fetch_channel_videos(
        &self,
        identifier: &ChannelIdentifier,
        max_videos: usize,
    ) -> Result<Vec<RankedVideo>> {
        let mut last_error = None;
        for base in &self.instances {
            match self.fetch_from_instance(base, identifier, max_videos).await {
                Ok(videos) => {
                    info!("Mirror {} served {} videos", base, videos.len());
                    return Ok(videos);
                }
                Err(err) => {
                    warn!("Mirror {} failed: {}", base, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AggregateError::upstream(None, "no mirror instances configured")))
    }
}

/// `/watch?v=ID` → `ID`
fn video_id_from_watch_path(path: &str) -> Option<String> {
    let url = Url::parse("https://piped.invalid").ok()?.join(path).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

#[derive(Debug, Deserialize)]
struct PipedChannelRef {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PipedPage {
    #[serde(default)]
    related_streams: Vec<PipedStream>,
    nextpage: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PipedStream {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PipedSearch {
    #[serde(default)]
    items: Vec<PipedSearchItem>,
}

#[derive(Debug, Deserialize)]
struct PipedSearchItem {
    url: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct PipedStreamInfo {
    views: Option<i64>,
    likes: Option<i64>,
}
