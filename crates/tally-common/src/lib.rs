//! Common utilities for tally chain packs.
//!
//! Conversions between base (micro) denominations and display tickers, plus
//! explorer URL helpers. Amounts inside the engine always stay in base
//! denomination; these helpers are for presentation at the edges.

use bigdecimal::BigDecimal;
use tally::engine::Coin;

/// Known base denominations and their display form.
///
/// IBC-hash denominations and LP share denoms (`gamm/pool/...`) are passed
/// through untouched; resolving those belongs to a denom-metadata layer, not
/// here.
const DENOMS: &[(&str, &str, u32)] = &[
    ("uosmo", "OSMO", 6),
    ("uion", "ION", 6),
    ("uatom", "ATOM", 6),
    ("ubld", "BLD", 6),
    ("uist", "IST", 6),
    ("uusdc", "USDC", 6),
    ("ustrd", "STRD", 6),
    ("utia", "TIA", 6),
];

/// Converts a base-denomination coin to its display form when the
/// denomination is known; returns the coin unchanged otherwise.
pub fn display_coin(coin: &Coin) -> Coin {
    match DENOMS.iter().find(|(base, _, _)| *base == coin.denom) {
        Some((_, ticker, exponent)) => {
            let divisor = BigDecimal::from(10u64.pow(*exponent));
            Coin::new((&coin.amount / divisor).normalized(), *ticker)
        }
        None => coin.clone(),
    }
}

/// Whether a denomination has a known display form.
pub fn is_known_denom(denom: &str) -> bool {
    DENOMS.iter().any(|(base, _, _)| *base == denom)
}

/// Mintscan transaction URL for a chain slug.
pub fn mintscan_tx_url(slug: &str, txid: &str) -> String {
    format!("https://www.mintscan.io/{slug}/tx/{txid}")
}
