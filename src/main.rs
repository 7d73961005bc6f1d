use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tributary::app::AppContext;
use tributary::cli::{commands, Cli, Commands};
use tributary::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if cli.workers.is_some() {
        config.fetch.workers = cli.workers;
    }
    if cli.db.is_some() {
        config.storage.path = cli.db.clone();
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Refresh { force } => {
            commands::refresh(&ctx, force).await?;
        }
        Commands::Add { url } => {
            commands::add_feed(&ctx, &url).await?;
        }
        Commands::Remove { url } => {
            commands::remove_feed(&ctx, &url).await?;
        }
        Commands::List => {
            commands::list_feeds(&ctx).await?;
        }
        Commands::Posts { feed } => {
            commands::list_posts(&ctx, feed.as_deref()).await?;
        }
    }

    Ok(())
}
