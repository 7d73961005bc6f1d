pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tributary")]
#[command(about = "An offline-first RSS/Atom reading list", long_about = None)]
pub struct Cli {
    /// Cap on parallel fetches (default: one task per feed)
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// SQLite database holding the feed cache
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load feeds, from the cache unless forced
    Refresh {
        /// Refetch every known feed
        #[arg(short, long)]
        force: bool,
    },
    /// Add a new feed
    Add {
        /// URL of the feed to add
        url: String,
    },
    /// Remove a feed
    Remove {
        /// URL of the feed to remove
        url: String,
    },
    /// List feeds
    List,
    /// List posts, newest first
    Posts {
        /// Only show posts of this feed
        #[arg(long)]
        feed: Option<String>,
    },
}
