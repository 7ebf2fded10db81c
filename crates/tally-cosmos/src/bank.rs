//! Bank module transfers (MsgSend, MsgMultiSend).

use anyhow::Result;
use serde_json::Value;
use tally::engine::{HandlerOutcome, Message, MsgHandler, Row, RowSink, Transaction};

/// Emits plain transfer rows from the wallet-relative balance changes.
///
/// A send the wallet is not a party to (possible with multisend fan-outs)
/// produces no rows but still counts as handled.
pub struct BankTransferHandler;

impl BankTransferHandler {
    fn counterparty(msg: &Message, incoming: bool) -> Option<String> {
        let field = if incoming { "from_address" } else { "to_address" };
        msg.body.get(field).and_then(Value::as_str).map(str::to_string)
    }
}

impl MsgHandler for BankTransferHandler {
    fn name(&self) -> &'static str {
        "bank-transfer"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        for coin in &msg.transfers_in {
            let mut row = Row::transfer_in(tx, msg.index, coin.clone());
            if let Some(counterparty) = Self::counterparty(msg, true) {
                row = row.with_counterparty(counterparty);
            }
            sink.append(row);
        }
        for coin in &msg.transfers_out {
            let mut row = Row::transfer_out(tx, msg.index, coin.clone());
            if let Some(counterparty) = Self::counterparty(msg, false) {
                row = row.with_counterparty(counterparty);
            }
            sink.append(row);
        }
        Ok(HandlerOutcome::Handled)
    }
}
