use crate::core::error::Result;
use crate::core::video::{RankedVideo, VideoStats, VideoSummary};
use futures::future::join_all;
use std::future::Future;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub videos: Vec<RankedVideo>,
    /// Lookups that failed and were zero-filled.
    pub failed: usize,
}

impl Enrichment {
    pub fn all_failed(&self) -> bool {
        !self.videos.is_empty() && self.failed == self.videos.len()
    }
}

/// Look up statistics for every video concurrently and join them back by position.
///
/// A failed lookup degrades that one video to zero views and likes.
pub async fn enrich_all<F, Fut>(videos: Vec<VideoSummary>, fetch_stats: F) -> Enrichment
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<VideoStats>>,
{
    let lookups = videos.iter().map(|video| fetch_stats(video.video_id.clone()));
    let results = join_all(lookups).await;

    let mut failed = 0;
    let videos: Vec<RankedVideo> = videos
        .into_iter()
        .zip(results)
        .map(|(summary, result)| {
            let stats = result.unwrap_or_else(|err| {
                warn!("Stats lookup failed for {}, using zeros: {}", summary.video_id, err);
                failed += 1;
                VideoStats::default()
            });
            RankedVideo::from_parts(summary, stats)
        })
        .collect();

    Enrichment { videos, failed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AggregateError;

    fn summary(id: &str) -> VideoSummary {
        VideoSummary {
            video_id: id.to_string(),
            title: format!("Title {}", id),
        }
    }

    #[tokio::test]
    async fn test_joins_positionally() {
        let videos = vec![summary("a"), summary("b"), summary("c")];
        let enriched = enrich_all(videos, |id| async move {
            let n = match id.as_str() {
                "a" => 1,
                "b" => 2,
                _ => 3,
            };
            Ok(VideoStats::new(n * 100, n))
        })
        .await;
        let ranked = enriched.videos;

        assert_eq!(enriched.failed, 0);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[1].video_id, "b");
        assert_eq!(ranked[1].title, "Title b");
        assert_eq!(ranked[1].views, 200);
        assert_eq!(ranked[2].likes, 3);
    }

    #[tokio::test]
    async fn test_failed_item_is_zero_filled() {
        let videos = vec![summary("ok"), summary("broken")];
        let enriched = enrich_all(videos, |id| async move {
            if id == "broken" {
                Err(AggregateError::upstream(Some(503), "unavailable"))
            } else {
                Ok(VideoStats::new(10, 1))
            }
        })
        .await;

        assert_eq!(enriched.failed, 1);
        assert!(!enriched.all_failed());
        assert_eq!(enriched.videos[0].views, 10);
        assert_eq!((enriched.videos[1].views, enriched.videos[1].likes), (0, 0));
    }

    #[tokio::test]
    async fn test_all_failed() {
        let enriched = enrich_all(vec![summary("a")], |_| async {
            Err(AggregateError::upstream(None, "down"))
        })
        .await;
        assert!(enriched.all_failed());

        let empty = enrich_all(Vec::new(), |_| async { Ok(VideoStats::default()) }).await;
        assert!(!empty.all_failed());
    }
}
