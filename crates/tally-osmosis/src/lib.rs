//! Osmosis chain pack.
//!
//! Message handlers for the Osmosis-specific module families (GAMM and
//! poolmanager swaps, classic and concentrated liquidity, lockup, superfluid)
//! plus the CosmWasm contract families worth dedicated handling. The
//! [`registry::build_registry`] function assembles the full dispatch table on
//! top of the chain-agnostic base from `tally-cosmos`.

pub mod concentrated;
pub mod contracts;
pub mod general;
pub mod lp;
pub mod registry;
pub mod superfluid;
pub mod swap;

pub use registry::build_registry;

#[cfg(test)]
pub(crate) mod testutil {
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use tally::engine::{Coin, Message, Transaction};

    pub fn coin(amount: u32, denom: &str) -> Coin {
        Coin::new(BigDecimal::from(amount), denom)
    }

    pub fn message(type_url: &str, ins: Vec<Coin>, outs: Vec<Coin>) -> Message {
        let mut msg = Message::new(0, type_url, serde_json::json!({}));
        msg.transfers_in = ins;
        msg.transfers_out = outs;
        msg
    }

    pub fn execute_message(
        contract: &str,
        payload: serde_json::Value,
        ins: Vec<Coin>,
        outs: Vec<Coin>,
    ) -> Message {
        let mut msg = message("/cosmwasm.wasm.v1.MsgExecuteContract", ins, outs);
        msg.contract = Some(contract.to_string());
        msg.execute_payload = Some(payload);
        msg
    }

    pub fn transaction(messages: Vec<Message>) -> Transaction {
        Transaction {
            txid: "OSMOTX".to_string(),
            timestamp: Utc::now(),
            fee: Some(coin(2500, "uosmo")),
            is_failed: false,
            messages,
            url: None,
            memo: String::new(),
        }
    }
}
