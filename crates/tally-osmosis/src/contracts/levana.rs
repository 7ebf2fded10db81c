//! Levana perpetuals.
//!
//! The Pyth oracle contract sits at one fixed address; the perps markets are
//! instantiated per market pair and are matched by their `Levana Perps
//! Market ...` label instead.

use anyhow::Result;
use tally::engine::{ContractHandler, HandlerOutcome, Message, Row, RowSink, Transaction};

/// Oracle price-feed pushes. No balance change for the wallet beyond the
/// update fee it fronts.
pub struct PythUpdateHandler;

impl ContractHandler for PythUpdateHandler {
    fn name(&self) -> &'static str {
        "osmosis-pyth-update"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        _label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        for sent in &msg.transfers_out {
            sink.append(
                Row::transfer_out(tx, msg.index, sent.clone())
                    .with_description("oracle price update fee"),
            );
        }
        if msg.transfers_out.is_empty() {
            sink.append(Row::simple(tx, msg.index, "oracle price update"));
        }
        Ok(HandlerOutcome::Handled)
    }
}

/// A perps market matched by label. Collateral deposits go out, withdrawals
/// and closed-position proceeds come back.
pub struct LevanaPerpsHandler;

impl ContractHandler for LevanaPerpsHandler {
    fn name(&self) -> &'static str {
        "osmosis-levana-perps"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        let market = label.unwrap_or("Levana Perps Market");

        if msg.transfers_in.is_empty() && msg.transfers_out.is_empty() {
            sink.append(Row::simple(tx, msg.index, market));
            return Ok(HandlerOutcome::Handled);
        }
        for sent in &msg.transfers_out {
            sink.append(
                Row::transfer_out(tx, msg.index, sent.clone())
                    .with_description(format!("{market} deposit")),
            );
        }
        for received in &msg.transfers_in {
            sink.append(
                Row::transfer_in(tx, msg.index, received.clone())
                    .with_description(format!("{market} withdrawal")),
            );
        }
        Ok(HandlerOutcome::Handled)
    }
}
