//! End-to-end pipeline tests: raw LCD records through the dispatcher with the
//! full Osmosis registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::{json, Value};
use tally::engine::{
    BatchDriver, CachedResolver, DispatchConfig, Dispatcher, EventTransferDetector, Exporter,
    LabelResolver, LcdNormalizer, RowKind,
};
use tally_osmosis::registry::CONTRACT_LIQUID_STAKE;

const WALLET: &str = "osmo1wallet";

struct FixedLabelResolver {
    label: &'static str,
    calls: AtomicUsize,
}

impl FixedLabelResolver {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LabelResolver for FixedLabelResolver {
    async fn resolve(&self, _address: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label.to_string())
    }
}

struct PanicResolver;

#[async_trait]
impl LabelResolver for PanicResolver {
    async fn resolve(&self, address: &str) -> anyhow::Result<String> {
        panic!("unexpected label resolution for {address}");
    }
}

fn dispatcher(resolver: Arc<dyn LabelResolver>) -> Dispatcher {
    Dispatcher::new(
        Arc::new(LcdNormalizer::new().with_explorer("osmosis")),
        Arc::new(tally_osmosis::build_registry().unwrap()),
        resolver,
        Arc::new(EventTransferDetector),
    )
}

fn transfer_event(recipient: &str, sender: &str, amount: &str) -> Value {
    json!({
        "type": "transfer",
        "attributes": [
            {"key": "recipient", "value": recipient},
            {"key": "sender", "value": sender},
            {"key": "amount", "value": amount}
        ]
    })
}

fn record(txhash: &str, messages: Vec<Value>, logs: Vec<Value>) -> Value {
    json!({
        "tx_response": {
            "txhash": txhash,
            "timestamp": "2023-06-01T12:00:00Z",
            "code": 0,
            "logs": logs,
            "tx": {
                "body": {"messages": messages, "memo": ""},
                "auth_info": {"fee": {"amount": [{"denom": "uosmo", "amount": "2500"}]}}
            }
        }
    })
}

#[tokio::test]
async fn swap_record_becomes_a_trade_row() {
    let raw = record(
        "SWAP1",
        vec![json!({"@type": "/osmosis.poolmanager.v1beta1.MsgSwapExactAmountIn"})],
        vec![json!({
            "msg_index": 0,
            "events": [
                transfer_event("osmo1pool", WALLET, "1000000uosmo"),
                transfer_event(WALLET, "osmo1pool", "15uion")
            ]
        })],
    );

    let mut sink = Exporter::new(WALLET);
    let tx = dispatcher(Arc::new(PanicResolver))
        .process(WALLET, &raw, &mut sink)
        .await
        .unwrap();

    assert_eq!(
        tx.url.as_deref(),
        Some("https://www.mintscan.io/osmosis/tx/SWAP1")
    );
    assert_eq!(sink.len(), 1);
    let row = &sink.rows()[0];
    assert_eq!(row.kind, RowKind::Trade);
    assert_eq!(row.received.as_ref().unwrap().denom, "uion");
    assert_eq!(row.sent.as_ref().unwrap().amount, BigDecimal::from(1_000_000u32));
}

#[tokio::test]
async fn failed_record_emits_exactly_one_fee_row() {
    let raw = json!({
        "tx_response": {
            "txhash": "FAIL1",
            "timestamp": "2023-06-01T12:00:00Z",
            "code": 5,
            "tx": {
                "body": {"messages": [{"@type": "/cosmos.bank.v1beta1.MsgSend"}], "memo": ""},
                "auth_info": {"fee": {"amount": [{"denom": "uosmo", "amount": "500"}]}}
            }
        }
    });

    let mut sink = Exporter::new(WALLET);
    dispatcher(Arc::new(PanicResolver))
        .process(WALLET, &raw, &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.len(), 1);
    let row = &sink.rows()[0];
    assert_eq!(row.kind, RowKind::Fee);
    assert_eq!(row.sent.as_ref().unwrap().amount, BigDecimal::from(500u32));
}

#[tokio::test]
async fn hard_coded_liquid_stake_address_skips_label_resolution() {
    let raw = record(
        "LIQ1",
        vec![json!({
            "@type": "/cosmwasm.wasm.v1.MsgExecuteContract",
            "sender": WALLET,
            "contract": CONTRACT_LIQUID_STAKE,
            "msg": {"liquid_stake": {}}
        })],
        vec![json!({
            "msg_index": 0,
            "events": [
                transfer_event(CONTRACT_LIQUID_STAKE, WALLET, "100uosmo"),
                transfer_event(WALLET, CONTRACT_LIQUID_STAKE, "95stuosmo")
            ]
        })],
    );

    let mut sink = Exporter::new(WALLET);
    // PanicResolver proves the exact-address table won without resolution
    dispatcher(Arc::new(PanicResolver))
        .process(WALLET, &raw, &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.len(), 1);
    assert_eq!(sink.rows()[0].kind, RowKind::Trade);
    assert_eq!(sink.rows()[0].description, "liquid stake");
}

#[tokio::test]
async fn unknown_address_routes_by_levana_label() {
    let raw = record(
        "LEV1",
        vec![json!({
            "@type": "/cosmwasm.wasm.v1.MsgExecuteContract",
            "sender": WALLET,
            "contract": "osmo1someperpsmarket",
            "msg": {"open_position": {}}
        })],
        vec![json!({
            "msg_index": 0,
            "events": [transfer_event("osmo1someperpsmarket", WALLET, "500uusdc")]
        })],
    );

    let resolver = Arc::new(FixedLabelResolver::new("Levana Perps Market - OSMO/USD"));
    let mut sink = Exporter::new(WALLET);
    dispatcher(Arc::clone(&resolver) as Arc<dyn LabelResolver>)
        .process(WALLET, &raw, &mut sink)
        .await
        .unwrap();

    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    assert_eq!(sink.len(), 1);
    let row = &sink.rows()[0];
    assert_eq!(row.kind, RowKind::TransferOut);
    assert!(row.description.starts_with("Levana Perps Market - OSMO/USD"));
}

#[tokio::test]
async fn label_cache_survives_across_transactions_in_a_batch() {
    let execute = |txhash: &str| {
        record(
            txhash,
            vec![json!({
                "@type": "/cosmwasm.wasm.v1.MsgExecuteContract",
                "sender": WALLET,
                "contract": "osmo1vault",
                "msg": {"exact_deposit": {}}
            })],
            vec![json!({
                "msg_index": 0,
                "events": [transfer_event("osmo1vault", WALLET, "100uosmo")]
            })],
        )
    };
    let raws = vec![execute("Q1"), execute("Q2"), execute("Q3")];

    let inner = FixedLabelResolver::new("quasar-cl-vault-3");
    let resolver = Arc::new(CachedResolver::new(inner));
    let driver = BatchDriver::new(dispatcher(
        Arc::clone(&resolver) as Arc<dyn LabelResolver>
    ));

    let mut sink = Exporter::new(WALLET);
    driver
        .process_all(WALLET, &raws, &mut sink, None)
        .await
        .unwrap();

    assert_eq!(sink.count_kind(&RowKind::LpDeposit), 3);
    assert_eq!(resolver.cached_len().await, 1);
}

#[tokio::test]
async fn unmatched_label_degrades_to_fallback() {
    let raw = record(
        "UNK1",
        vec![json!({
            "@type": "/cosmwasm.wasm.v1.MsgExecuteContract",
            "sender": WALLET,
            "contract": "osmo1mystery",
            "msg": {"do_something": {}}
        })],
        vec![json!({
            "msg_index": 0,
            "events": [
                transfer_event("osmo1mystery", WALLET, "10uosmo"),
                transfer_event(WALLET, "osmo1mystery", "3uion")
            ]
        })],
    );

    let mut sink = Exporter::new(WALLET);
    dispatcher(Arc::new(FixedLabelResolver::new("some-unrelated-dapp")))
        .process(WALLET, &raw, &mut sink)
        .await
        .unwrap();

    // one-in-one-out collapses into a single unknown-kind row
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.rows()[0].kind, RowKind::Unknown);
}

#[tokio::test]
async fn multi_message_record_emits_rows_in_message_order() {
    let raw = record(
        "MULTI1",
        vec![
            json!({"@type": "/osmosis.gamm.v1beta1.MsgSwapExactAmountIn"}),
            json!({"@type": "/osmosis.someday.v9.MsgBrandNewThing"}),
        ],
        vec![
            json!({
                "msg_index": 0,
                "events": [
                    transfer_event("osmo1pool", WALLET, "100uosmo"),
                    transfer_event(WALLET, "osmo1pool", "5uion")
                ]
            }),
            json!({"msg_index": 1, "events": []}),
        ],
    );

    let mut sink = Exporter::new(WALLET);
    dispatcher(Arc::new(PanicResolver))
        .process(WALLET, &raw, &mut sink)
        .await
        .unwrap();

    let kinds: Vec<RowKind> = sink.rows().iter().map(|row| row.kind.clone()).collect();
    assert_eq!(kinds, vec![RowKind::Trade, RowKind::Unknown]);
}

#[tokio::test]
async fn debug_mode_halts_batch_on_malformed_record() {
    let good = record(
        "OK1",
        vec![json!({"@type": "/cosmos.bank.v1beta1.MsgSend"})],
        vec![json!({"msg_index": 0, "events": []})],
    );
    let malformed = json!({"tx_response": {"timestamp": "2023-06-01T12:00:00Z"}});
    let raws = vec![good.clone(), malformed, good];

    let debug_driver = BatchDriver::new(
        dispatcher(Arc::new(PanicResolver)).with_config(DispatchConfig { debug: true }),
    );
    let mut sink = Exporter::new(WALLET);
    assert!(debug_driver
        .process_all(WALLET, &raws, &mut sink, None)
        .await
        .is_err());

    // outside debug mode the same batch completes
    let driver = BatchDriver::new(dispatcher(Arc::new(PanicResolver)));
    let mut sink = Exporter::new(WALLET);
    driver
        .process_all(WALLET, &raws, &mut sink, None)
        .await
        .unwrap();
}
