use crate::core::paging::{collect_pages, Page};
use crate::core::{Result, VideoSummary};
use crate::sources::youtube_api::{ListResponse, SearchItem, YouTubeApi};

/// Items per search page; the API maximum.
pub const PAGE_SIZE: usize = 50;

impl YouTubeApi {
    /// List a channel's videos newest first, up to `max_videos`.
    pub async fn list_videos(&self, channel_id: &str, max_videos: usize) -> Result<Vec<VideoSummary>> {
        collect_pages(max_videos, |token| self.fetch_video_page(channel_id, token)).await
    }

    async fn fetch_video_page(&self, channel_id: &str, token: Option<String>) -> Result<Page> {
        let page_size = PAGE_SIZE.to_string();
        let mut params = vec![
            ("part", "snippet,id"),
            ("channelId", channel_id),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = token.as_deref() {
            params.push(("pageToken", token));
        }

        let response: ListResponse<SearchItem> = self.get_json("search", &params).await?;
        let items = response
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let title = item.snippet.map(|s| s.title).unwrap_or_default();
                Some(VideoSummary { video_id, title })
            })
            .collect();

        Ok(Page {
            items,
            next: response.next_page_token,
        })
    }
}
