//! Concentrated-liquidity positions.

use anyhow::Result;
use tally::engine::{
    HandlerOutcome, Message, MsgHandler, MsgKind, Row, RowKind, RowSink, Transaction,
};

/// One handler for the whole concentrated-liquidity family; the message kind
/// decides the row shape.
pub struct ConcentratedLpHandler;

impl MsgHandler for ConcentratedLpHandler {
    fn name(&self) -> &'static str {
        "osmosis-concentrated-lp"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        match msg.kind {
            MsgKind::CreatePosition | MsgKind::AddToPosition => {
                if msg.transfers_out.is_empty() {
                    return Ok(HandlerOutcome::NotHandled);
                }
                for sent in &msg.transfers_out {
                    sink.append(
                        Row::transfer_out(tx, msg.index, sent.clone())
                            .with_kind(RowKind::LpDeposit)
                            .with_description("concentrated position deposit"),
                    );
                }
            }
            MsgKind::WithdrawPosition => {
                if msg.transfers_in.is_empty() {
                    return Ok(HandlerOutcome::NotHandled);
                }
                for received in &msg.transfers_in {
                    sink.append(
                        Row::transfer_in(tx, msg.index, received.clone())
                            .with_kind(RowKind::LpWithdraw)
                            .with_description("concentrated position withdrawal"),
                    );
                }
            }
            MsgKind::CollectIncentives | MsgKind::CollectSpreadRewards => {
                if msg.transfers_in.is_empty() {
                    // position had nothing to collect; keep the operation visible
                    sink.append(Row::simple(tx, msg.index, "nothing collected"));
                    return Ok(HandlerOutcome::Handled);
                }
                for received in &msg.transfers_in {
                    sink.append(
                        Row::staking_reward(tx, msg.index, received.clone())
                            .with_description("concentrated position rewards"),
                    );
                }
            }
            MsgKind::UnlockAndMigrateSharesToFullRangeConcentratedPosition => {
                sink.append(Row::simple(
                    tx,
                    msg.index,
                    "migrate shares to concentrated position",
                ));
            }
            _ => return Ok(HandlerOutcome::NotHandled),
        }
        Ok(HandlerOutcome::Handled)
    }
}
