//! Stride-style liquid staking at a fixed contract address.

use anyhow::Result;
use tally::engine::{ContractHandler, HandlerOutcome, Message, Row, RowSink, Transaction};

/// Staking OSMO for its liquid-staked counterpart is a trade: one coin out,
/// the receipt token in.
pub struct LiquidStakeHandler;

impl ContractHandler for LiquidStakeHandler {
    fn name(&self) -> &'static str {
        "osmosis-liquid-stake"
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
                .with_description("liquid stake"),
        );
        Ok(HandlerOutcome::Handled)
    }
}
