//! TFM aggregator: swap router and limit orders.

use anyhow::Result;
use tally::engine::{ContractHandler, HandlerOutcome, Message, Row, RowSink, Transaction};

/// Router swaps look exactly like pool swaps: one coin out, one coin in.
pub struct TfmRouterHandler;

impl ContractHandler for TfmRouterHandler {
    fn name(&self) -> &'static str {
        "osmosis-tfm-router"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        _label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        let ([received], [sent]) = (msg.transfers_in.as_slice(), msg.transfers_out.as_slice())
        else {
            return Ok(HandlerOutcome::NotHandled);
        };
        sink.append(
            Row::trade(tx, msg.index, received.clone(), sent.clone())
                .with_description("tfm swap"),
        );
        Ok(HandlerOutcome::Handled)
    }
}

/// Limit orders escrow funds on placement and pay out on execution or cancel.
pub struct TfmLimitOrderHandler;

impl ContractHandler for TfmLimitOrderHandler {
    fn name(&self) -> &'static str {
        "osmosis-tfm-limit-order"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        _label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        if msg.transfers_in.is_empty() && msg.transfers_out.is_empty() {
            sink.append(Row::simple(tx, msg.index, "tfm limit order"));
            return Ok(HandlerOutcome::Handled);
        }
        for sent in &msg.transfers_out {
            sink.append(
                Row::transfer_out(tx, msg.index, sent.clone())
                    .with_description("tfm limit order escrow"),
            );
        }
        for received in &msg.transfers_in {
            sink.append(
                Row::transfer_in(tx, msg.index, received.clone())
                    .with_description("tfm limit order payout"),
            );
        }
        Ok(HandlerOutcome::Handled)
    }
}
