use crate::core::error::{AggregateError, Result};
use crate::core::identifier::{parse_channel_url, ChannelIdentifier};
use crate::core::ranking::{rank, SortMode};
use crate::core::video::RankedVideo;
use async_trait::async_trait;
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_VIDEOS: usize = 50;
pub const MAX_VIDEOS_RANGE: RangeInclusive<usize> = 50..=350;

/// A place the channel's videos and their statistics can be read from.
#[async_trait]
pub trait VideoSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolve the channel, list up to `max_videos` videos and attach statistics.
    async fn fetch_channel_videos(
        &self,
        identifier: &ChannelIdentifier,
        max_videos: usize,
    ) -> Result<Vec<RankedVideo>>;
}

/// Runs a request against each registered source in order until one succeeds.
pub struct Aggregator {
    pub sources: Vec<Box<dyn VideoSource>>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn register_source(&mut self, source: Box<dyn VideoSource>) {
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: Box<dyn VideoSource>) -> Self {
        self.register_source(source);
        self
    }

    pub async fn aggregate(
        &self,
        channel_url: &str,
        sort_mode: SortMode,
        max_videos: usize,
    ) -> Result<Vec<RankedVideo>> {
        validate_max_videos(max_videos)?;

        let identifier = parse_channel_url(channel_url)
            .ok_or_else(|| AggregateError::invalid_input("Could not parse channel URL"))?;
        info!("Aggregating {} (sort: {}, max: {})", identifier, sort_mode, max_videos);

        let mut last_error = None;
        for source in &self.sources {
            debug!("Trying source {}", source.name());
            match source.fetch_channel_videos(&identifier, max_videos).await {
                Ok(mut videos) => {
                    info!("Source {} returned {} videos", source.name(), videos.len());
                    videos.truncate(max_videos);
                    return Ok(rank(&videos, sort_mode));
                }
                Err(err) => {
                    warn!("Source {} failed: {}", source.name(), err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AggregateError::upstream(None, "no video sources configured")))
    }
}

pub fn validate_max_videos(max_videos: usize) -> Result<()> {
    if !MAX_VIDEOS_RANGE.contains(&max_videos) {
        return Err(AggregateError::invalid_input(format!(
            "maxVideos must be between {} and {}",
            MAX_VIDEOS_RANGE.start(),
            MAX_VIDEOS_RANGE.end()
        )));
    }
    Ok(())
}
