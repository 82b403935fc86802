use crate::core::error::Result;
use crate::core::video::VideoSummary;
use std::collections::HashSet;
use std::future::Future;
use tracing::debug;

/// One page of a channel listing plus the cursor for the next one.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<VideoSummary>,
    pub next: Option<String>,
}

/// Follow continuation tokens until `max_videos` unique videos are collected,
/// a page comes back empty, or the upstream stops handing out tokens.
///
/// The first call receives `None`. Any page error aborts the whole listing.
pub async fn collect_pages<F, Fut>(max_videos: usize, mut fetch_page: F) -> Result<Vec<VideoSummary>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page>>,
{
    let mut videos: Vec<VideoSummary> = Vec::new();
    let mut seen = HashSet::new();
    let mut token: Option<String> = None;

    loop {
        let page = fetch_page(token.clone()).await?;
        if page.items.is_empty() {
            break;
        }

        for item in page.items {
            if seen.insert(item.video_id.clone()) {
                videos.push(item);
            }
        }
        debug!("Fetched {} videos so far from channel", videos.len());

        if videos.len() >= max_videos {
            break;
        }

        match page.next {
            // a repeated cursor would loop forever
            Some(next) if !next.is_empty() && token.as_deref() != Some(next.as_str()) => {
                token = Some(next)
            }
            _ => break,
        }
    }

    videos.truncate(max_videos);
    Ok(videos)
}
