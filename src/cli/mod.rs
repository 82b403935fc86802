use crate::config::Config;
use crate::core::{RankedVideo, SortMode, DEFAULT_MAX_VIDEOS};
use crate::server;
use crate::sources::build_aggregator;
use crate::utils::{format_count, format_ratio, truncate_title, watch_url};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "yt-ranker")]
#[command(about = "Rank a YouTube channel's videos by likes or like-to-view ratio")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./yt-ranker.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Address to listen on, overrides the config file
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Rank one channel and print the result
    Rank {
        /// Channel URL, e.g. https://www.youtube.com/@veritasium
        #[arg(value_name = "CHANNEL_URL")]
        channel_url: String,

        #[arg(short, long, value_enum, default_value_t = SortArg::Likes)]
        sort: SortArg,

        /// Number of most recent videos to consider (50-350)
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_VIDEOS)]
        max_videos: usize,

        /// Print the JSON response body instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortArg {
    Likes,
    Ratio,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Likes => SortMode::Likes,
            SortArg::Ratio => SortMode::Ratio,
        }
    }
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let mut config = Config::load(self.config.as_deref())?;

        match &self.command {
            Command::Serve { listen } => {
                if let Some(listen) = listen {
                    config.listen_addr = listen.clone();
                }
                server::serve(&config).await
            }
            Command::Rank {
                channel_url,
                sort,
                max_videos,
                json,
            } => {
                let aggregator = build_aggregator(&config)?;
                let videos = aggregator
                    .aggregate(channel_url, (*sort).into(), *max_videos)
                    .await?;

                if *json {
                    let body = serde_json::json!({ "data": videos });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                } else {
                    print_table(&videos);
                }
                Ok(())
            }
        }
    }
}

fn print_table(videos: &[RankedVideo]) {
    if videos.is_empty() {
        println!("No videos found.");
        return;
    }

    println!(
        "{:>4}  {:>12}  {:>14}  {:>7}  {:<60}  {}",
        "#", "Likes", "Views", "Ratio", "Title", "Link"
    );
    for (i, video) in videos.iter().enumerate() {
        println!(
            "{:>4}  {:>12}  {:>14}  {:>7}  {:<60}  {}",
            i + 1,
            format_count(video.likes),
            format_count(video.views),
            format_ratio(video),
            truncate_title(&video.title, 60),
            watch_url(&video.video_id)
        );
    }
}
