// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chainbase address crawler
//!
//! Enriches the configured address list for one chain and stores the results.

use anyhow::Result;
use clap::Parser;
use crawler::{CrawlerConfig, PersistOutcome, execute};
use shared_types::ChainId;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "crawler", version, about)]
struct Cli {
    /// Chain to crawl, numeric id or name
    #[arg(long, default_value_t = ChainId::ETHEREUM)]
    chain_id: ChainId,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = CrawlerConfig::load()?;

    match execute(&config, cli.chain_id).await? {
        PersistOutcome::Inserted(inserted) => info!(inserted, "run complete"),
        PersistOutcome::Skipped => info!("run complete, nothing saved"),
        PersistOutcome::Spilled { path, .. } => {
            warn!(path = %path.display(), "run complete, results saved to backup");
        }
        PersistOutcome::SpillFailed { .. } => warn!("run complete, results were lost"),
    }

    Ok(())
}
