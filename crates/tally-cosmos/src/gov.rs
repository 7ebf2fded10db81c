//! Governance messages (vote, proposal submission, deposit).

use anyhow::Result;
use tally::engine::{HandlerOutcome, Message, MsgHandler, MsgKind, Row, RowSink, Transaction};

pub struct GovHandler;

impl MsgHandler for GovHandler {
    fn name(&self) -> &'static str {
        "gov"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        if msg.kind == MsgKind::Vote {
            sink.append(Row::simple(tx, msg.index, "governance vote"));
            return Ok(HandlerOutcome::Handled);
        }

        // proposal submission and deposits lock coins with the module
        if msg.transfers_out.is_empty() {
            sink.append(Row::simple(tx, msg.index, msg.kind.name()));
        } else {
            for coin in &msg.transfers_out {
                sink.append(
                    Row::transfer_out(tx, msg.index, coin.clone())
                        .with_description("governance deposit"),
                );
            }
        }
        Ok(HandlerOutcome::Handled)
    }
}
