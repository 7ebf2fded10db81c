//! Mars protocol: credit manager, incentives, Red Bank lending.

use anyhow::Result;
use tally::engine::{ContractHandler, HandlerOutcome, Message, Row, RowSink, Transaction};

use super::payload_method;

/// Incentives contract: claiming accrued rewards.
pub struct MarsClaimRewardsHandler;

impl ContractHandler for MarsClaimRewardsHandler {
    fn name(&self) -> &'static str {
        "osmosis-mars-claim-rewards"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        _label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        if msg.transfers_in.is_empty() {
            sink.append(Row::simple(tx, msg.index, "mars rewards claim"));
            return Ok(HandlerOutcome::Handled);
        }
        for received in &msg.transfers_in {
            sink.append(
                Row::staking_reward(tx, msg.index, received.clone())
                    .with_description("mars rewards"),
            );
        }
        Ok(HandlerOutcome::Handled)
    }
}

/// Credit manager: deposits into and withdrawals out of a credit account.
pub struct MarsCreditManagerHandler;

impl ContractHandler for MarsCreditManagerHandler {
    fn name(&self) -> &'static str {
        "osmosis-mars-credit-manager"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        _label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        let method = payload_method(msg.execute_payload.as_ref()).unwrap_or("credit account");
        if msg.transfers_in.is_empty() && msg.transfers_out.is_empty() {
            sink.append(Row::simple(tx, msg.index, format!("mars {method}")));
            return Ok(HandlerOutcome::Handled);
        }
        for sent in &msg.transfers_out {
            sink.append(
                Row::transfer_out(tx, msg.index, sent.clone())
                    .with_description(format!("mars {method}")),
            );
        }
        for received in &msg.transfers_in {
            sink.append(
                Row::transfer_in(tx, msg.index, received.clone())
                    .with_description(format!("mars {method}")),
            );
        }
        Ok(HandlerOutcome::Handled)
    }
}

/// Red Bank money market. The payload method distinguishes principal
/// movements (deposit/withdraw/borrow/repay); all are plain transfers for
/// accounting purposes.
pub struct MarsRedBankHandler;

impl ContractHandler for MarsRedBankHandler {
    fn name(&self) -> &'static str {
        "osmosis-mars-red-bank"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        _label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        let method = payload_method(msg.execute_payload.as_ref()).unwrap_or("red bank");
        for sent in &msg.transfers_out {
            sink.append(
                Row::transfer_out(tx, msg.index, sent.clone())
                    .with_description(format!("red bank {method}")),
            );
        }
        for received in &msg.transfers_in {
            sink.append(
                Row::transfer_in(tx, msg.index, received.clone())
                    .with_description(format!("red bank {method}")),
            );
        }
        if msg.transfers_in.is_empty() && msg.transfers_out.is_empty() {
            sink.append(Row::simple(tx, msg.index, format!("red bank {method}")));
        }
        Ok(HandlerOutcome::Handled)
    }
}
