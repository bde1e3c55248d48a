use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "safe-tx-timeline",
    version,
    about = "Group multisig transaction pages into renderable timelines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group a history page into date buckets
    History {
        /// Gateway page as JSON
        #[arg(long)]
        page: PathBuf,
    },
    /// Group a queue page into conflict and bulk groups
    Queue {
        #[arg(long)]
        page: PathBuf,
    },
    /// List queued transactions executable as one batch
    Batch {
        #[arg(long)]
        page: PathBuf,
        /// Current on-chain nonce of the safe
        #[arg(long)]
        nonce: u64,
        /// Override BATCH_LIMIT (never above 20)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run the HTTP API server
    Serve {
        /// Override bind address, e.g. 0.0.0.0:8080
        #[arg(long)]
        addr: Option<String>,
    },
}
