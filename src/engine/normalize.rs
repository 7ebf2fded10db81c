//! Raw record normalization.
//!
//! Converts one decoded ledger record into the canonical [`Transaction`] and
//! [`Message`] shapes, regardless of the chain it came from. The engine ships
//! the Cosmos LCD adapter; other indexer encodings plug in behind the
//! [`Normalizer`] trait.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::transaction::{Coin, Message, MsgKind, Transaction};

/// Per-chain adapter from raw decoded records to the canonical shape.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, wallet: &str, raw: &Value) -> Result<Transaction>;
}

/// Normalizer for the Cosmos LCD `tx_response` encoding.
///
/// Understands both a bare response object and one wrapped in a
/// `{"tx_response": {...}}` envelope. Wallet-relative transfers are extracted
/// from each message's `transfer` events.
pub struct LcdNormalizer {
    explorer_slug: Option<String>,
}

impl LcdNormalizer {
    pub fn new() -> Self {
        Self {
            explorer_slug: None,
        }
    }

    /// Attaches `https://www.mintscan.io/<slug>/tx/<txid>` display URLs.
    pub fn with_explorer(mut self, slug: impl Into<String>) -> Self {
        self.explorer_slug = Some(slug.into());
        self
    }

    fn extract_messages(wallet: &str, response: &Value) -> Result<Vec<Message>> {
        let raw_messages = response
            .pointer("/tx/body/messages")
            .and_then(Value::as_array)
            .context("record carries no message list")?;

        let logs = response.pointer("/logs").and_then(Value::as_array);

        let mut messages = Vec::with_capacity(raw_messages.len());
        for (index, body) in raw_messages.iter().enumerate() {
            let type_url = body
                .get("@type")
                .and_then(Value::as_str)
                .with_context(|| format!("message {index} carries no type URL"))?;

            let mut msg = Message::new(index, type_url, body.clone());

            if msg.kind == MsgKind::ExecuteContract {
                msg.contract = body
                    .get("contract")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                msg.execute_payload = body.get("msg").cloned();
            }

            if let Some(log) = logs.and_then(|logs| Self::log_for_index(logs, index)) {
                let (ins, outs) = Self::wallet_transfers(wallet, log);
                msg.transfers_in = ins;
                msg.transfers_out = outs;
            }

            messages.push(msg);
        }
        Ok(messages)
    }

    /// Finds the event log for a message. Logs carry an explicit `msg_index`,
    /// except that some node versions omit it for index zero.
    fn log_for_index(logs: &[Value], index: usize) -> Option<&Value> {
        logs.iter().find(|log| {
            log.get("msg_index")
                .and_then(Value::as_u64)
                .map_or(index == 0, |i| i as usize == index)
        })
    }

    /// Collects wallet-relative coins from a message log's `transfer` events.
    ///
    /// Transfer attributes repeat in (recipient, sender, amount) groups within
    /// a single event, so the last seen recipient/sender applies to each
    /// amount.
    fn wallet_transfers(wallet: &str, log: &Value) -> (Vec<Coin>, Vec<Coin>) {
        let mut ins = Vec::new();
        let mut outs = Vec::new();

        let events = log
            .get("events")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for event in events {
            if event.get("type").and_then(Value::as_str) != Some("transfer") {
                continue;
            }
            let attributes = event
                .get("attributes")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            let mut recipient = None;
            let mut sender = None;
            for attribute in attributes {
                let key = attribute.get("key").and_then(Value::as_str).unwrap_or("");
                let value = attribute.get("value").and_then(Value::as_str).unwrap_or("");
                match key {
                    "recipient" => recipient = Some(value),
                    "sender" => sender = Some(value),
                    "amount" => {
                        let coins = Coin::parse_event_amounts(value);
                        if recipient == Some(wallet) {
                            ins.extend(coins.clone());
                        }
                        if sender == Some(wallet) {
                            outs.extend(coins);
                        }
                    }
                    _ => {}
                }
            }
        }
        (ins, outs)
    }
}

impl Default for LcdNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer for LcdNormalizer {
    fn normalize(&self, wallet: &str, raw: &Value) -> Result<Transaction> {
        let response = raw.get("tx_response").unwrap_or(raw);

        let txid = response
            .get("txhash")
            .and_then(Value::as_str)
            .context("record carries no txhash")?
            .to_string();

        let timestamp = response
            .get("timestamp")
            .and_then(Value::as_str)
            .context("record carries no timestamp")
            .and_then(|ts| {
                DateTime::parse_from_rfc3339(ts)
                    .with_context(|| format!("unparseable timestamp `{ts}`"))
            })?
            .with_timezone(&Utc);

        let is_failed = response
            .get("code")
            .and_then(Value::as_u64)
            .unwrap_or(0)
            != 0;

        let fee = response
            .pointer("/tx/auth_info/fee/amount/0")
            .and_then(|coin| {
                let amount = coin.get("amount")?.as_str()?.parse().ok()?;
                let denom = coin.get("denom")?.as_str()?;
                Some(Coin::new(amount, denom))
            });

        let memo = response
            .pointer("/tx/body/memo")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        // Failed transactions carry no usable logs; their messages are never
        // examined anyway.
        let messages = if is_failed {
            Vec::new()
        } else {
            Self::extract_messages(wallet, response)
                .with_context(|| format!("normalizing transaction {txid}"))?
        };

        let url = self
            .explorer_slug
            .as_deref()
            .map(|slug| format!("https://www.mintscan.io/{slug}/tx/{txid}"));

        tracing::trace!(
            target: "tally::engine::normalize",
            txid = %txid,
            messages = messages.len(),
            failed = is_failed,
            "normalized transaction"
        );

        Ok(Transaction {
            txid,
            timestamp,
            fee,
            is_failed,
            messages,
            url,
            memo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use serde_json::json;

    const WALLET: &str = "osmo1wallet";

    fn send_record() -> Value {
        json!({
            "tx_response": {
                "txhash": "5E1A",
                "timestamp": "2023-06-01T12:00:00Z",
                "code": 0,
                "logs": [
                    {
                        "msg_index": 0,
                        "events": [
                            {
                                "type": "transfer",
                                "attributes": [
                                    {"key": "recipient", "value": "osmo1other"},
                                    {"key": "sender", "value": WALLET},
                                    {"key": "amount", "value": "250000uosmo"}
                                ]
                            }
                        ]
                    }
                ],
                "tx": {
                    "body": {
                        "messages": [
                            {
                                "@type": "/cosmos.bank.v1beta1.MsgSend",
                                "from_address": WALLET,
                                "to_address": "osmo1other",
                                "amount": [{"denom": "uosmo", "amount": "250000"}]
                            }
                        ],
                        "memo": "rent"
                    },
                    "auth_info": {
                        "fee": {"amount": [{"denom": "uosmo", "amount": "2500"}]}
                    }
                }
            }
        })
    }

    #[test]
    fn normalizes_send_record() {
        let tx = LcdNormalizer::new()
            .with_explorer("osmosis")
            .normalize(WALLET, &send_record())
            .unwrap();

        assert_eq!(tx.txid, "5E1A");
        assert!(!tx.is_failed);
        assert_eq!(tx.memo, "rent");
        assert_eq!(tx.fee.as_ref().unwrap().amount, BigDecimal::from(2500u32));
        assert_eq!(
            tx.url.as_deref(),
            Some("https://www.mintscan.io/osmosis/tx/5E1A")
        );

        assert_eq!(tx.messages.len(), 1);
        let msg = &tx.messages[0];
        assert_eq!(msg.kind, MsgKind::Send);
        assert!(msg.transfers_in.is_empty());
        assert_eq!(msg.transfers_out.len(), 1);
        assert_eq!(msg.transfers_out[0].amount, BigDecimal::from(250_000u32));
    }

    #[test]
    fn failed_record_keeps_fee_and_drops_messages() {
        let raw = json!({
            "tx_response": {
                "txhash": "DEAD",
                "timestamp": "2023-06-01T12:00:00Z",
                "code": 11,
                "tx": {
                    "body": {"messages": [{"@type": "/cosmos.bank.v1beta1.MsgSend"}], "memo": ""},
                    "auth_info": {"fee": {"amount": [{"denom": "uosmo", "amount": "500"}]}}
                }
            }
        });

        let tx = LcdNormalizer::new().normalize(WALLET, &raw).unwrap();
        assert!(tx.is_failed);
        assert!(tx.messages.is_empty());
        assert_eq!(tx.fee.as_ref().unwrap().amount, BigDecimal::from(500u32));
    }

    #[test]
    fn extracts_contract_execution_fields() {
        let raw = json!({
            "txhash": "C0DE",
            "timestamp": "2023-06-01T12:00:00Z",
            "code": 0,
            "logs": [{"msg_index": 0, "events": []}],
            "tx": {
                "body": {
                    "messages": [
                        {
                            "@type": "/cosmwasm.wasm.v1.MsgExecuteContract",
                            "sender": WALLET,
                            "contract": "osmo1contract",
                            "msg": {"swap": {"min_out": "1"}}
                        }
                    ],
                    "memo": ""
                },
                "auth_info": {"fee": {"amount": []}}
            }
        });

        let tx = LcdNormalizer::new().normalize(WALLET, &raw).unwrap();
        let msg = &tx.messages[0];
        assert_eq!(msg.kind, MsgKind::ExecuteContract);
        assert_eq!(msg.contract.as_deref(), Some("osmo1contract"));
        assert!(msg.execute_payload.as_ref().unwrap().get("swap").is_some());
        assert!(tx.fee.is_none());
    }

    #[test]
    fn grouped_transfer_attributes_resolve_per_amount() {
        let raw = json!({
            "txhash": "AB12",
            "timestamp": "2023-06-01T12:00:00Z",
            "code": 0,
            "logs": [{
                "msg_index": 0,
                "events": [{
                    "type": "transfer",
                    "attributes": [
                        {"key": "recipient", "value": WALLET},
                        {"key": "sender", "value": "osmo1pool"},
                        {"key": "amount", "value": "7uion"},
                        {"key": "recipient", "value": "osmo1pool"},
                        {"key": "sender", "value": WALLET},
                        {"key": "amount", "value": "100uosmo"}
                    ]
                }]
            }],
            "tx": {
                "body": {
                    "messages": [{"@type": "/osmosis.gamm.v1beta1.MsgSwapExactAmountIn"}],
                    "memo": ""
                },
                "auth_info": {"fee": {"amount": []}}
            }
        });

        let tx = LcdNormalizer::new().normalize(WALLET, &raw).unwrap();
        let msg = &tx.messages[0];
        assert_eq!(msg.transfers_in.len(), 1);
        assert_eq!(msg.transfers_in[0].denom, "uion");
        assert_eq!(msg.transfers_out.len(), 1);
        assert_eq!(msg.transfers_out[0].denom, "uosmo");
    }

    #[test]
    fn missing_txhash_is_an_error() {
        let raw = json!({"timestamp": "2023-06-01T12:00:00Z"});
        assert!(LcdNormalizer::new().normalize(WALLET, &raw).is_err());
    }
}
