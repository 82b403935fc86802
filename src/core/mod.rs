pub mod enrich;
pub mod error;
pub mod identifier;
pub mod paging;
pub mod ranking;
pub mod source;
pub mod video;

pub use error::{AggregateError, Result};
pub use identifier::{parse_channel_url, ChannelIdentifier};
pub use ranking::{rank, SortMode};
pub use source::{Aggregator, VideoSource, DEFAULT_MAX_VIDEOS, MAX_VIDEOS_RANGE};
pub use video::{RankedVideo, VideoStats, VideoSummary};
