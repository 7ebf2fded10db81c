//! ICNS name service (registrar and resolver contracts).

use anyhow::Result;
use tally::engine::{ContractHandler, HandlerOutcome, Message, Row, RowSink, Transaction};

pub struct IcnsHandler;

impl ContractHandler for IcnsHandler {
    fn name(&self) -> &'static str {
        "osmosis-icns"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        _label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        if msg.transfers_out.is_empty() {
            // resolver updates cost nothing beyond the fee
            sink.append(Row::simple(tx, msg.index, "icns record update"));
            return Ok(HandlerOutcome::Handled);
        }
        for sent in &msg.transfers_out {
            sink.append(
                Row::transfer_out(tx, msg.index, sent.clone())
                    .with_description("icns name registration"),
            );
        }
        Ok(HandlerOutcome::Handled)
    }
}
