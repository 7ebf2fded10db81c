//! Tally Osmosis report binary.
//!
//! Fetches a wallet's transaction history from an LCD node, drives the
//! dispatch engine over it with the full Osmosis registry, and logs a summary
//! of the normalized rows. Export formatting is a downstream concern; this
//! binary stops at the populated row sink.
//!
//! # Usage
//!
//! ```bash
//! # full history against the default public node
//! tally-report-osmosis osmo1yourwallet...
//!
//! # custom node, fail-fast diagnostics
//! tally-report-osmosis osmo1yourwallet... --node https://my-lcd:1317 --debug
//! ```

mod config;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tally::engine::{
    BatchDriver, CachedResolver, DispatchConfig, Dispatcher, EventTransferDetector, Exporter,
    LcdLabelResolver, LcdNormalizer, LogProgress,
};
use tally_common::display_coin;
use tally_fetcher_lcd::{LcdFetcherConfig, LcdTxFetcher, RetryPolicy};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .init();

    tracing::info!("Starting Osmosis report");
    tracing::info!("Wallet: {}", config.wallet);
    tracing::info!("Node: {}", config.node);
    tracing::info!("Limit: {}", config.limit);
    if config.debug {
        tracing::info!("Debug mode: handler errors halt the run");
    }

    let registry = Arc::new(tally_osmosis::build_registry()?);
    let resolver = Arc::new(CachedResolver::new(LcdLabelResolver::new(&config.node)));
    let normalizer = Arc::new(LcdNormalizer::new().with_explorer("osmosis"));

    let dispatcher = Dispatcher::new(
        normalizer,
        registry,
        resolver,
        Arc::new(EventTransferDetector),
    )
    .with_config(DispatchConfig {
        debug: config.debug,
    });
    let driver = BatchDriver::new(dispatcher);

    let fetcher = LcdTxFetcher::new(LcdFetcherConfig {
        node: config.node.clone(),
        max_txs: config.limit,
        retry: RetryPolicy::default(),
    });

    let progress = LogProgress;
    let raws = fetcher.fetch_all(&config.wallet, Some(&progress)).await?;
    tracing::info!("Processing {} Osmosis transactions...", raws.len());

    let mut exporter = Exporter::new(&config.wallet);
    driver
        .process_all(&config.wallet, &raws, &mut exporter, Some(&progress))
        .await?;

    // Final statistics
    tracing::info!("Final Statistics:");
    tracing::info!("  Total rows: {}", exporter.len());
    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for row in exporter.rows() {
        *by_kind.entry(row.kind.as_str()).or_default() += 1;
    }
    for (kind, count) in by_kind {
        tracing::info!("  {kind}: {count}");
    }
    if let Some(row) = exporter.rows().last() {
        if let Some(received) = &row.received {
            tracing::info!("  Last row received: {}", display_coin(received));
        }
    }

    Ok(())
}
