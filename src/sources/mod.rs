pub mod channel_resolver;
pub mod piped;
pub mod stats;
pub mod video_lister;
pub mod youtube_api;

pub use piped::PipedSource;
pub use youtube_api::YouTubeApi;

use crate::config::Config;
use crate::core::Aggregator;
use anyhow::Context;
use std::time::Duration;

/// One pooled client shared by every source.
pub fn http_client(config: &Config) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout))
        .build()
}

/// Mirror federation first (when enabled), the Data API last.
///
/// The Data API is registered even without a key so that a request which
/// falls through to it reports the missing credential.
pub fn build_aggregator(config: &Config) -> anyhow::Result<Aggregator> {
    let client = http_client(config).context("Failed to create HTTP client")?;
    let mut aggregator = Aggregator::new();

    if config.enable_mirror && !config.mirror_instances.is_empty() {
        aggregator.register_source(Box::new(PipedSource::new(
            client.clone(),
            config.mirror_instances.clone(),
        )));
    }
    aggregator.register_source(Box::new(YouTubeApi::new(
        client,
        config.youtube_api_base.clone(),
        config.youtube_api_key.clone(),
    )));

    Ok(aggregator)
}
