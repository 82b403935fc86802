use crate::core::error::AggregateError;
use crate::core::video::RankedVideo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Likes,
    Ratio,
}

impl FromStr for SortMode {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "likes" => Ok(Self::Likes),
            "ratio" => Ok(Self::Ratio),
            other => Err(AggregateError::invalid_input(format!(
                "Invalid sortMode '{}': expected 'likes' or 'ratio'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Likes => write!(f, "likes"),
            Self::Ratio => write!(f, "ratio"),
        }
    }
}

/// Return a new list ordered descending by the chosen key.
///
/// The sort is stable, so equal keys keep their incoming (recency) order.
/// See [`RankedVideo::like_ratio`] for how zero-view videos rank.
pub fn rank(videos: &[RankedVideo], mode: SortMode) -> Vec<RankedVideo> {
    let mut ranked = videos.to_vec();
    match mode {
        SortMode::Likes => ranked.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SortMode::Ratio => ranked.sort_by(|a, b| b.like_ratio().total_cmp(&a.like_ratio())),
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, views: u64, likes: u64) -> RankedVideo {
        RankedVideo {
            title: format!("Video {}", id),
            video_id: id.to_string(),
            views,
            likes,
        }
    }

    fn ids(videos: &[RankedVideo]) -> Vec<&str> {
        videos.iter().map(|v| v.video_id.as_str()).collect()
    }

    #[test]
    fn test_rank_by_likes() {
        let videos = vec![video("a", 100, 5), video("b", 100, 50), video("c", 10, 20)];
        let ranked = rank(&videos, SortMode::Likes);
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
        assert!(ranked.windows(2).all(|w| w[0].likes >= w[1].likes));
        // input is left alone
        assert_eq!(ids(&videos), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_by_ratio() {
        let videos = vec![video("a", 1000, 10), video("b", 100, 50), video("c", 200, 20)];
        let ranked = rank(&videos, SortMode::Ratio);
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].likes as f64 / w[0].views as f64 >= w[1].likes as f64 / w[1].views as f64));
    }

    #[test]
    fn test_ratio_zero_views() {
        let videos = vec![
            video("empty", 0, 0),
            video("normal", 100, 10),
            video("hidden", 0, 5),
        ];
        let ranked = rank(&videos, SortMode::Ratio);
        assert_eq!(ids(&ranked), vec!["hidden", "normal", "empty"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let videos = vec![video("first", 10, 7), video("second", 20, 7), video("third", 30, 7)];
        assert_eq!(ids(&rank(&videos, SortMode::Likes)), vec!["first", "second", "third"]);

        let videos = vec![video("x", 10, 1), video("y", 20, 2), video("z", 0, 0), video("w", 0, 0)];
        assert_eq!(ids(&rank(&videos, SortMode::Ratio)), vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("likes".parse::<SortMode>().unwrap(), SortMode::Likes);
        assert_eq!("RATIO".parse::<SortMode>().unwrap(), SortMode::Ratio);
        assert!("views".parse::<SortMode>().is_err());
        assert_eq!(SortMode::default(), SortMode::Likes);
    }
}
