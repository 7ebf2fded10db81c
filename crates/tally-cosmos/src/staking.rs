//! Staking and distribution messages.
//!
//! Delegation-family messages auto-claim any pending rewards, so the rows
//! that matter are the reward transfers attached to the message, not the
//! (re)delegated principal itself.

use anyhow::Result;
use serde_json::Value;
use tally::engine::{HandlerOutcome, Message, MsgHandler, MsgKind, Row, RowSink, Transaction};

/// Handles MsgDelegate, MsgUndelegate, MsgBeginRedelegate,
/// MsgWithdrawDelegatorReward, MsgWithdrawValidatorCommission and
/// MsgSetWithdrawAddress.
pub struct StakingHandler;

impl StakingHandler {
    fn validator(msg: &Message) -> Option<String> {
        msg.body
            .get("validator_address")
            .or_else(|| msg.body.get("validator_src_address"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl MsgHandler for StakingHandler {
    fn name(&self) -> &'static str {
        "staking"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        if msg.kind == MsgKind::SetWithdrawAddress {
            sink.append(Row::simple(tx, msg.index, "set withdraw address"));
            return Ok(HandlerOutcome::Handled);
        }

        if msg.transfers_in.is_empty() {
            // nothing claimed alongside the operation; record it as a
            // non-taxable event so the transaction stays visible
            sink.append(Row::simple(tx, msg.index, msg.kind.name()));
            return Ok(HandlerOutcome::Handled);
        }

        tracing::debug!(
            target: "tally_cosmos::staking",
            txid = %tx.txid,
            kind = msg.kind.name(),
            rewards = msg.transfers_in.len(),
            "rewards claimed alongside staking operation"
        );
        for coin in &msg.transfers_in {
            let mut row = Row::staking_reward(tx, msg.index, coin.clone());
            if let Some(validator) = Self::validator(msg) {
                row = row.with_counterparty(validator);
            }
            sink.append(row);
        }
        Ok(HandlerOutcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tally::engine::{Exporter, RowKind};

    use crate::testutil::{coin, message, transaction};

    #[test]
    fn delegate_with_auto_claimed_rewards_emits_reward_rows() {
        let msg = message(
            "/cosmos.staking.v1beta1.MsgDelegate",
            json!({"validator_address": "osmovaloper1x"}),
            vec![coin(1234, "uosmo")],
            vec![],
        );
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        StakingHandler.handle(&mut sink, &tx, &tx.messages[0]).unwrap();

        assert_eq!(sink.len(), 1);
        let row = &sink.rows()[0];
        assert_eq!(row.kind, RowKind::StakingReward);
        assert_eq!(row.counterparty.as_deref(), Some("osmovaloper1x"));
    }

    #[test]
    fn withdraw_rewards_emits_one_row_per_coin() {
        let msg = message(
            "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward",
            json!({"validator_address": "osmovaloper1x"}),
            vec![coin(10, "uosmo"), coin(3, "uion")],
            vec![],
        );
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        StakingHandler.handle(&mut sink, &tx, &tx.messages[0]).unwrap();

        assert_eq!(sink.count_kind(&RowKind::StakingReward), 2);
    }

    #[test]
    fn delegate_without_rewards_is_a_simple_row() {
        let msg = message(
            "/cosmos.staking.v1beta1.MsgDelegate",
            json!({"validator_address": "osmovaloper1x"}),
            vec![],
            vec![],
        );
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        StakingHandler.handle(&mut sink, &tx, &tx.messages[0]).unwrap();

        assert_eq!(sink.rows()[0].kind, RowKind::Simple);
        assert_eq!(sink.rows()[0].description, "MsgDelegate");
    }
}
