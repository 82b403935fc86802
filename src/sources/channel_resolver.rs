use crate::core::{AggregateError, ChannelIdentifier, Result};
use crate::sources::youtube_api::{ChannelItem, ListResponse, SearchItem, YouTubeApi};
use tracing::{debug, warn};

/// Candidates requested from channel search when matching a custom path.
pub const SEARCH_CANDIDATES: usize = 5;

impl YouTubeApi {
    /// Map an identifier to a canonical `UC...` channel id.
    ///
    /// Handles go through the exact `forHandle` lookup first and fall back to
    /// search. Custom paths always use search.
    pub async fn resolve_channel(&self, identifier: &ChannelIdentifier) -> Result<String> {
        match identifier {
            ChannelIdentifier::ChannelId(id) => Ok(id.clone()),
            ChannelIdentifier::Handle(handle) => match self.lookup_handle(handle).await {
                Ok(Some(id)) => Ok(id),
                Ok(None) => {
                    debug!("No exact match for @{}, falling back to search", handle);
                    self.resolve_custom_path(handle).await
                }
                Err(err) => {
                    warn!("Handle lookup for @{} failed, falling back to search: {}", handle, err);
                    self.resolve_custom_path(handle).await
                }
            },
            ChannelIdentifier::LegacyCustomPath(name) => self.resolve_custom_path(name).await,
        }
    }

    async fn lookup_handle(&self, handle: &str) -> Result<Option<String>> {
        let response: ListResponse<ChannelItem> = self
            .get_json("channels", &[("part", "id"), ("forHandle", handle)])
            .await?;
        Ok(response.items.into_iter().next().map(|item| item.id))
    }

    /// Search for channels named like `query` and prefer the one whose custom URL matches exactly.
    ///
    /// Without an exact match the first search result is returned.
    async fn resolve_custom_path(&self, query: &str) -> Result<String> {
        let max_results = SEARCH_CANDIDATES.to_string();
        let response: ListResponse<SearchItem> = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let candidates: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|item| item.id.channel_id)
            .collect();

        let Some(first) = candidates.first().cloned() else {
            return Err(AggregateError::resolution("channel not found"));
        };

        let wanted = normalize_custom_url(query);
        for candidate in &candidates {
            match self.custom_url(candidate).await {
                Ok(Some(custom_url)) if normalize_custom_url(&custom_url) == wanted => {
                    debug!("Custom URL match for '{}': {}", query, candidate);
                    return Ok(candidate.clone());
                }
                Ok(_) => {}
                Err(err) => debug!("Profile lookup for {} failed: {}", candidate, err),
            }
        }

        debug!("No exact custom URL match for '{}', using first result {}", query, first);
        Ok(first)
    }

    async fn custom_url(&self, channel_id: &str) -> Result<Option<String>> {
        let response: ListResponse<ChannelItem> = self
            .get_json("channels", &[("part", "snippet"), ("id", channel_id)])
            .await?;
        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.snippet)
            .and_then(|snippet| snippet.custom_url))
    }
}

fn normalize_custom_url(value: &str) -> String {
    value.trim().trim_start_matches('@').to_lowercase()
}
