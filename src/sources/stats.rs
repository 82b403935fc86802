use crate::core::{Result, VideoStats};
use crate::sources::youtube_api::{ListResponse, VideoItem, YouTubeApi};

impl YouTubeApi {
    /// View and like counts for one video. Absent counts, or an unknown video, read as zero.
    pub async fn video_stats(&self, video_id: &str) -> Result<VideoStats> {
        let response: ListResponse<VideoItem> = self
            .get_json("videos", &[("part", "statistics"), ("id", video_id)])
            .await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .map(|item| {
                VideoStats::from_strings(
                    item.statistics.view_count.as_deref(),
                    item.statistics.like_count.as_deref(),
                )
            })
            .unwrap_or_default())
    }
}
