use serde::{Deserialize, Serialize};

/// A video as listed on the channel, before statistics are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoStats {
    pub views: u64,
    pub likes: u64,
}

impl VideoStats {
    pub fn new(views: u64, likes: u64) -> Self {
        Self { views, likes }
    }

    /// Counts some upstreams report as `-1` when hidden.
    pub fn from_signed(views: Option<i64>, likes: Option<i64>) -> Self {
        let clamp = |v: Option<i64>| v.map(|n| n.max(0) as u64).unwrap_or(0);
        Self {
            views: clamp(views),
            likes: clamp(likes),
        }
    }

    /// The Data API encodes counts as decimal strings.
    pub fn from_strings(views: Option<&str>, likes: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0);
        Self {
            views: parse(views),
            likes: parse(likes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedVideo {
    pub title: String,
    pub video_id: String,
    pub views: u64,
    pub likes: u64,
}

impl RankedVideo {
    pub fn from_parts(summary: VideoSummary, stats: VideoStats) -> Self {
        Self {
            title: summary.title,
            video_id: summary.video_id,
            views: stats.views,
            likes: stats.likes,
        }
    }

    /// Like-to-view ratio. Zero views with likes is `+inf`, zero of both is `0`.
    pub fn like_ratio(&self) -> f64 {
        if self.views == 0 {
            if self.likes > 0 {
                f64::INFINITY
            } else {
                0.0
            }
        } else {
            self.likes as f64 / self.views as f64
        }
    }
}
