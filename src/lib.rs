pub mod cli;
pub mod config;
pub mod core;
pub mod server;
pub mod sources;
pub mod utils;

pub use crate::config::Config;
pub use crate::core::{AggregateError, Aggregator, ChannelIdentifier, RankedVideo, SortMode, VideoSource};
pub use crate::sources::{PipedSource, YouTubeApi};
