//! Tally - Cosmos transaction accounting normalizer.
//!
//! This library ingests decoded transactions from account-based Cosmos-ecosystem
//! ledgers and converts each into a normalized sequence of accounting rows
//! (transfers, trades, fees, staking events). The core is the classification and
//! dispatch engine in [`engine`]: a registry maps message kinds to handlers, a
//! secondary table routes generic contract executions by address or resolved
//! contract label, and anything unrecognized degrades into generic transfer
//! detection instead of aborting the transaction.
//!
//! Chain packs (see `crates/tally-cosmos`, `crates/tally-osmosis`) supply the
//! handlers; binaries wire a registry, a label resolver, and a sink into a
//! [`engine::Dispatcher`] and drive it with a [`engine::BatchDriver`].

pub mod engine;

// Re-export commonly used types for external handler authors
pub use async_trait::async_trait;
pub use tokio;
