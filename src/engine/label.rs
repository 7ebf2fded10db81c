//! Contract label resolution.
//!
//! Some contract families are only identifiable by their human-readable label
//! (instantiated per-user or per-vault, so no stable address to hard-code).
//! The dispatcher consults a [`LabelResolver`] for contract executions that
//! miss the exact-address table.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Resolves a contract address to its display label.
///
/// Idempotent and cacheable by address: labels are effectively immutable per
/// contract instance, so staleness within a run is acceptable.
#[async_trait]
pub trait LabelResolver: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<String>;
}

/// Write-once-per-address cache around any resolver.
///
/// First resolution for an address wins and every later lookup reuses it for
/// the process lifetime; a cache hit skips the inner resolver entirely.
pub struct CachedResolver<R> {
    inner: R,
    cache: RwLock<HashMap<String, String>>,
}

impl<R> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl<R: LabelResolver> LabelResolver for CachedResolver<R> {
    async fn resolve(&self, address: &str) -> Result<String> {
        if let Some(label) = self.cache.read().await.get(address) {
            return Ok(label.clone());
        }

        let label = self.inner.resolve(address).await?;
        tracing::debug!(
            target: "tally::engine::label",
            contract = %address,
            label = %label,
            "contract label resolved"
        );
        self.cache
            .write()
            .await
            .entry(address.to_string())
            .or_insert_with(|| label.clone());
        Ok(label)
    }
}

/// Fetches contract labels from a node's LCD endpoint.
///
/// `GET {node}/cosmwasm/wasm/v1/contract/{address}` returns the contract info
/// including the label the contract was instantiated with. Wrap in a
/// [`CachedResolver`] for dispatch use; this type performs the network call
/// every time.
pub struct LcdLabelResolver {
    client: reqwest::Client,
    node: String,
}

impl LcdLabelResolver {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            node: node.into(),
        }
    }
}

#[async_trait]
impl LabelResolver for LcdLabelResolver {
    async fn resolve(&self, address: &str) -> Result<String> {
        let url = format!(
            "{}/cosmwasm/wasm/v1/contract/{}",
            self.node.trim_end_matches('/'),
            address
        );

        let response: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("contract info request failed for {address}"))?
            .error_for_status()
            .with_context(|| format!("contract info request rejected for {address}"))?
            .json()
            .await
            .with_context(|| format!("malformed contract info response for {address}"))?;

        response
            .pointer("/contract_info/label")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .with_context(|| format!("contract info for {address} carries no label"))
    }
}
