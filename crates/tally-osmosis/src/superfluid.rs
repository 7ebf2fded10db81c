//! Superfluid staking (staking locked LP shares).

use anyhow::Result;
use tally::engine::{
    HandlerOutcome, Message, MsgHandler, MsgKind, Row, RowKind, RowSink, Transaction,
};

pub struct SuperfluidHandler;

impl MsgHandler for SuperfluidHandler {
    fn name(&self) -> &'static str {
        "osmosis-superfluid"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        match msg.kind {
            MsgKind::SuperfluidDelegate => {
                sink.append(Row::simple(tx, msg.index, "superfluid delegate"));
            }
            MsgKind::LockAndSuperfluidDelegate => {
                sink.append(
                    Row::simple(tx, msg.index, "lock and superfluid delegate")
                        .with_kind(RowKind::LpStake),
                );
            }
            MsgKind::SuperfluidUndelegate | MsgKind::SuperfluidUnbondLock => {
                sink.append(
                    Row::simple(tx, msg.index, "superfluid undelegate")
                        .with_kind(RowKind::LpUnstake),
                );
            }
            MsgKind::CreateFullRangePositionAndSuperfluidDelegate => {
                if msg.transfers_out.is_empty() {
                    return Ok(HandlerOutcome::NotHandled);
                }
                for sent in &msg.transfers_out {
                    sink.append(
                        Row::transfer_out(tx, msg.index, sent.clone())
                            .with_kind(RowKind::LpDeposit)
                            .with_description("full range position + superfluid delegate"),
                    );
                }
            }
            _ => return Ok(HandlerOutcome::NotHandled),
        }
        Ok(HandlerOutcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally::engine::Exporter;

    use crate::testutil::{coin, message, transaction};

    #[test]
    fn delegate_and_undelegate_are_marker_rows() {
        let delegate = message("/osmosis.superfluid.MsgSuperfluidDelegate", vec![], vec![]);
        let undelegate = message("/osmosis.superfluid.MsgSuperfluidUndelegate", vec![], vec![]);
        let tx = transaction(vec![delegate, undelegate]);
        let mut sink = Exporter::new("osmo1me");

        for msg in &tx.messages {
            SuperfluidHandler.handle(&mut sink, &tx, msg).unwrap();
        }

        assert_eq!(sink.rows()[0].kind, RowKind::Simple);
        assert_eq!(sink.rows()[1].kind, RowKind::LpUnstake);
    }

    #[test]
    fn full_range_position_records_deposits() {
        let msg = message(
            "/osmosis.superfluid.MsgCreateFullRangePositionAndSuperfluidDelegate",
            vec![],
            vec![coin(100, "uosmo"), coin(7, "uatom")],
        );
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        SuperfluidHandler.handle(&mut sink, &tx, &tx.messages[0]).unwrap();

        assert_eq!(sink.count_kind(&RowKind::LpDeposit), 2);
    }
}
