//! Tally Agoric report binary.
//!
//! Thin chain entry point: Agoric needs nothing beyond the chain-agnostic
//! Cosmos handlers, so this wires the base registry straight into the engine.
//! Contract executions fall through to transfer detection (the base registry
//! carries no contract bindings, so no label resolution is ever attempted).

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tally::engine::{
    BatchDriver, CachedResolver, DispatchConfig, Dispatcher, EventTransferDetector, Exporter,
    LcdLabelResolver, LcdNormalizer, LogProgress,
};
use tally_fetcher_lcd::{LcdFetcherConfig, LcdTxFetcher, RetryPolicy};

/// Agoric transaction history report
#[derive(Parser, Debug)]
#[command(name = "tally-report-agoric")]
#[command(about = "Normalize an Agoric wallet's transaction history", long_about = None)]
struct Config {
    /// Wallet address to report on
    wallet: String,

    /// LCD node URL
    #[arg(long, env = "BLD_NODE", default_value = "https://main.api.agoric.net")]
    node: String,

    /// Upper bound on transactions fetched per direction
    #[arg(long, default_value = "20000")]
    limit: usize,

    /// Re-raise handler errors instead of degrading to transfer detection
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .init();

    tracing::info!("Starting Agoric report for {}", config.wallet);

    let registry = Arc::new(tally_cosmos::build_base_registry()?);
    let resolver = Arc::new(CachedResolver::new(LcdLabelResolver::new(&config.node)));
    let normalizer = Arc::new(LcdNormalizer::new().with_explorer("agoric"));

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
    tracing::info!("Processing {} Agoric transactions...", raws.len());

    let mut exporter = Exporter::new(&config.wallet);
    driver
        .process_all(&config.wallet, &raws, &mut exporter, Some(&progress))
        .await?;

    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for row in exporter.rows() {
        *by_kind.entry(row.kind.as_str()).or_default() += 1;
    }
    tracing::info!("Final Statistics:");
    tracing::info!("  Total rows: {}", exporter.len());
    for (kind, count) in by_kind {
        tracing::info!("  {kind}: {count}");
    }

    Ok(())
}
