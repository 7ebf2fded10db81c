//! GAMM / poolmanager swap messages.

use anyhow::Result;
use tally::engine::{HandlerOutcome, Message, MsgHandler, Row, RowSink, Transaction};

/// Covers the four swap kinds (exact-in, exact-out, and their split-route
/// variants). A swap is one coin out, one coin in; anything else is declined
/// so the fallback detector can record what actually moved.
pub struct SwapHandler;

impl MsgHandler for SwapHandler {
    fn name(&self) -> &'static str {
        "osmosis-swap"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        let ([received], [sent]) = (msg.transfers_in.as_slice(), msg.transfers_out.as_slice())
        else {
            tracing::debug!(
                target: "tally_osmosis::swap",
                txid = %tx.txid,
                ins = msg.transfers_in.len(),
                outs = msg.transfers_out.len(),
                "swap without a clean in/out pair, declining"
            );
            return Ok(HandlerOutcome::NotHandled);
        };

        sink.append(
            Row::trade(tx, msg.index, received.clone(), sent.clone())
                .with_description("pool swap"),
        );
        Ok(HandlerOutcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally::engine::{Exporter, RowKind};

    use crate::testutil::{coin, message, transaction};

    #[test]
    fn clean_swap_becomes_a_trade_row() {
        let msg = message(
            "/osmosis.poolmanager.v1beta1.MsgSwapExactAmountIn",
            vec![coin(15, "uion")],
            vec![coin(1_000_000, "uosmo")],
        );
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        let outcome = SwapHandler.handle(&mut sink, &tx, &tx.messages[0]).unwrap();

        assert_eq!(outcome, HandlerOutcome::Handled);
        let row = &sink.rows()[0];
        assert_eq!(row.kind, RowKind::Trade);
        assert_eq!(row.received.as_ref().unwrap().denom, "uion");
        assert_eq!(row.sent.as_ref().unwrap().denom, "uosmo");
    }

    #[test]
    fn lopsided_swap_is_declined() {
        let msg = message(
            "/osmosis.gamm.v1beta1.MsgSwapExactAmountIn",
            vec![],
            vec![coin(10, "uosmo")],
        );
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        let outcome = SwapHandler.handle(&mut sink, &tx, &tx.messages[0]).unwrap();

        assert_eq!(outcome, HandlerOutcome::NotHandled);
        assert!(sink.is_empty());
    }
}
