use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yt_ranker::cli::Cli;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "yt_ranker=debug,info" } else { "yt_ranker=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting yt-ranker v{}", env!("CARGO_PKG_VERSION"));

    cli.run().await?;

    Ok(())
}
