mod cli;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use safe_tx_timeline::api::{self, AppState};
use safe_tx_timeline::config::Config;
use safe_tx_timeline::error::TimelineError;
use safe_tx_timeline::models::Page;
use safe_tx_timeline::timeline;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Serve { addr } => {
            let bind = addr.unwrap_or_else(|| config.http_bind_addr.clone());
            api::run_http_server(&bind, AppState { config }).await?;
        }
        Commands::History { page } => {
            let page = read_page(&page)?;
            let buckets = timeline::history_timeline(&page.results, &config.utc_offset);
            tracing::info!("grouped history page into {} buckets", buckets.len());
            print_json(&buckets)?;
        }
        Commands::Queue { page } => {
            let page = read_page(&page)?;
            let items = timeline::queue_timeline(&page.results);
            tracing::info!("grouped queue page into {} entries", items.len());
            print_json(&items)?;
        }
        Commands::Batch { page, nonce, limit } => {
            let page = read_page(&page)?;
            let limit = limit.unwrap_or(config.batch_limit);
            let batch = timeline::batchable_from_queue(&page.results, nonce, limit);
            tracing::info!(
                "{} transactions executable as one batch from nonce {}",
                batch.len(),
                nonce
            );
            print_json(&batch)?;
        }
    }

    Ok(())
}

fn read_page(path: &Path) -> anyhow::Result<Page> {
    let raw = std::fs::read_to_string(path)
        .map_err(TimelineError::from)
        .with_context(|| format!("failed to read {}", path.display()))?;
    timeline::parse_page(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{}", out);
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
