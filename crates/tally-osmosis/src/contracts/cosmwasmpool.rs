//! CosmWasm-backed pools (label `cosmwasmpool`).

use anyhow::Result;
use tally::engine::{ContractHandler, HandlerOutcome, Message, Row, RowSink, Transaction};

/// Swaps routed through a CosmWasm pool contract instead of a native pool.
pub struct CosmwasmPoolHandler;

impl ContractHandler for CosmwasmPoolHandler {
    fn name(&self) -> &'static str {
        "osmosis-cosmwasmpool"
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
                .with_description("cosmwasm pool swap"),
        );
        Ok(HandlerOutcome::Handled)
    }
}
