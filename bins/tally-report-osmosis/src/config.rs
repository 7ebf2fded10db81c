//! Configuration for the Osmosis report binary.

use clap::Parser;

/// Osmosis transaction history report
///
/// Fetches a wallet's history from an LCD node and normalizes every
/// transaction into accounting rows.
#[derive(Parser, Debug)]
#[command(name = "tally-report-osmosis")]
#[command(about = "Normalize an Osmosis wallet's transaction history", long_about = None)]
pub struct Config {
    /// Wallet address to report on
    pub wallet: String,

    /// LCD node URL
    #[arg(long, env = "OSMO_NODE", default_value = "https://lcd.osmosis.zone")]
    pub node: String,

    /// Upper bound on transactions fetched per direction
    #[arg(long, default_value = "20000")]
    pub limit: usize,

    /// Re-raise handler errors instead of degrading to transfer detection
    ///
    /// Development aid: the first failing message halts the run with a
    /// backtraceable error instead of an unknown-kind row.
    #[arg(long)]
    pub debug: bool,
}
