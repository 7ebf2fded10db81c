//! Miscellaneous messages recorded as simple rows.

use anyhow::Result;
use tally::engine::{HandlerOutcome, Message, MsgHandler, Row, RowSink, Transaction};

/// For operations with no accounting consequence beyond the fee: smart-account
/// authenticator management, validator-set preferences.
pub struct SimpleMsgHandler;

impl MsgHandler for SimpleMsgHandler {
    fn name(&self) -> &'static str {
        "osmosis-simple"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        sink.append(Row::simple(tx, msg.index, msg.kind.name()));
        Ok(HandlerOutcome::Handled)
    }
}
