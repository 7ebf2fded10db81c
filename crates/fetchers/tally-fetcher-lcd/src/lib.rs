//! Paginated transaction-history fetcher against a Cosmos LCD endpoint.
//!
//! Walks `/cosmos/tx/v1beta1/txs` for both directions a wallet can appear in
//! (message sender and transfer recipient), merges the two histories, and
//! returns raw `tx_response` records in chronological order — the shape the
//! engine's normalizer expects. Transient request failures retry with
//! exponential backoff.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tally::engine::Progress;
use tokio::time::sleep;

/// Progress phase reported while pages are fetched.
pub const PHASE_FETCH_TRANSACTIONS: &str = "fetch_transactions";

const PAGE_LIMIT: usize = 100;

/// Retry behavior for page requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

/// Configuration for the LCD fetcher.
#[derive(Debug, Clone)]
pub struct LcdFetcherConfig {
    /// LCD base URL, e.g. `https://lcd.osmosis.zone`.
    pub node: String,
    /// Upper bound on transactions fetched per direction.
    pub max_txs: usize,
    pub retry: RetryPolicy,
}

pub struct LcdTxFetcher {
    client: reqwest::Client,
    config: LcdFetcherConfig,
}

impl LcdTxFetcher {
    pub fn new(config: LcdFetcherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetches the wallet's full history, both directions merged and sorted
    /// chronologically.
    pub async fn fetch_all(
        &self,
        wallet: &str,
        progress: Option<&dyn Progress>,
    ) -> Result<Vec<Value>> {
        let sent = self
            .fetch_events(&format!("message.sender='{wallet}'"), progress)
            .await?;
        let received = self
            .fetch_events(&format!("transfer.recipient='{wallet}'"), progress)
            .await?;

        let merged = merge_histories(sent, received);
        tracing::info!(
            target: "tally_fetcher_lcd",
            wallet = %wallet,
            transactions = merged.len(),
            "fetched transaction history"
        );
        Ok(merged)
    }

    /// Walks one events query to exhaustion (or the configured cap).
    async fn fetch_events(
        &self,
        events: &str,
        progress: Option<&dyn Progress>,
    ) -> Result<Vec<Value>> {
        let mut all = Vec::new();
        let mut next_key: Option<String> = None;

        loop {
            let page = self.fetch_page(events, next_key.as_deref()).await?;
            all.extend(page.records);

            if let Some(progress) = progress {
                progress.report(
                    all.len(),
                    &format!("Fetched {} transactions for {events}", all.len()),
                    PHASE_FETCH_TRANSACTIONS,
                );
            }

            match page.next_key {
                Some(key) if all.len() < self.config.max_txs => next_key = Some(key),
                _ => break,
            }
        }

        all.truncate(self.config.max_txs);
        Ok(all)
    }

    async fn fetch_page(&self, events: &str, next_key: Option<&str>) -> Result<Page> {
        let mut url = format!(
            "{}/cosmos/tx/v1beta1/txs?events={}&pagination.limit={}&order_by=ORDER_BY_ASC",
            self.config.node.trim_end_matches('/'),
            urlencoding::encode(events),
            PAGE_LIMIT,
        );
        if let Some(key) = next_key {
            url.push_str("&pagination.key=");
            url.push_str(&urlencoding::encode(key));
        }

        let mut backoff = self.config.retry.initial_backoff;
        let mut attempts = 0;

        let body: Value = loop {
            let result = async {
                self.client
                    .get(&url)
                    .send()
                    .await
                    .context("transaction page request failed")?
                    .error_for_status()
                    .context("transaction page request rejected")?
                    .json::<Value>()
                    .await
                    .context("malformed transaction page")
            }
            .await;

            match result {
                Ok(body) => break body,
                Err(err) => {
                    attempts += 1;
                    if attempts > self.config.retry.max_retries {
                        return Err(err);
                    }
                    tracing::warn!(
                        target: "tally_fetcher_lcd",
                        attempt = attempts,
                        error = %format!("{err:#}"),
                        "page fetch failed, retrying"
                    );
                    sleep(backoff).await;
                    backoff *= 2;
                }
            }
        };

        let records = body
            .get("tx_responses")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let next_key = body
            .pointer("/pagination/next_key")
            .and_then(Value::as_str)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Ok(Page { records, next_key })
    }
}

struct Page {
    records: Vec<Value>,
    next_key: Option<String>,
}

/// Merges two fetched histories: deduplicates by txhash (a transaction can
/// appear in both directions) and sorts chronologically. RFC 3339 timestamps
/// sort correctly as strings.
pub fn merge_histories(a: Vec<Value>, b: Vec<Value>) -> Vec<Value> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Value> = a
        .into_iter()
        .chain(b)
        .filter(|record| {
            let txhash = record
                .get("txhash")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            seen.insert(txhash)
        })
        .collect();

    merged.sort_by(|x, y| {
        let ts = |record: &Value| {
            record
                .get("timestamp")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        ts(x).cmp(&ts(y))
    });
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(txhash: &str, timestamp: &str) -> Value {
        json!({"txhash": txhash, "timestamp": timestamp})
    }

    #[test]
    fn merge_deduplicates_by_txhash() {
        let a = vec![record("A", "2023-01-01T00:00:00Z")];
        let b = vec![
            record("A", "2023-01-01T00:00:00Z"),
            record("B", "2023-01-02T00:00:00Z"),
        ];

        let merged = merge_histories(a, b);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_sorts_chronologically() {
        let a = vec![record("LATE", "2023-06-01T00:00:00Z")];
        let b = vec![
            record("EARLY", "2023-01-01T00:00:00Z"),
            record("MID", "2023-03-15T12:30:00Z"),
        ];

        let merged = merge_histories(a, b);
        let order: Vec<&str> = merged
            .iter()
            .map(|record| record.get("txhash").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["EARLY", "MID", "LATE"]);
    }
}
