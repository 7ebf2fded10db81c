//! Classic GAMM liquidity pools and the lockup module.

use anyhow::Result;
use tally::engine::{
    HandlerOutcome, Message, MsgHandler, MsgKind, Row, RowKind, RowSink, Transaction,
};

/// MsgJoinPool / MsgJoinSwapExternAmountIn: tokens leave the wallet, pool
/// shares (`gamm/pool/<id>`) come back.
pub struct LpDepositHandler;

impl MsgHandler for LpDepositHandler {
    fn name(&self) -> &'static str {
        "osmosis-lp-deposit"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        if msg.transfers_out.is_empty() {
            return Ok(HandlerOutcome::NotHandled);
        }

        let shares = msg
            .transfers_in
            .iter()
            .find(|coin| coin.denom.starts_with("gamm/pool/"));
        let description = shares.map_or_else(
            || "pool deposit".to_string(),
            |shares| format!("pool deposit for {}", shares.denom),
        );

        for sent in &msg.transfers_out {
            sink.append(
                Row::transfer_out(tx, msg.index, sent.clone())
                    .with_kind(RowKind::LpDeposit)
                    .with_description(description.clone()),
            );
        }
        Ok(HandlerOutcome::Handled)
    }
}

/// MsgExitPool: shares burn, tokens return to the wallet.
pub struct LpWithdrawHandler;

impl MsgHandler for LpWithdrawHandler {
    fn name(&self) -> &'static str {
        "osmosis-lp-withdraw"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        if msg.transfers_in.is_empty() {
            return Ok(HandlerOutcome::NotHandled);
        }
        for received in &msg.transfers_in {
            sink.append(
                Row::transfer_in(tx, msg.index, received.clone())
                    .with_kind(RowKind::LpWithdraw)
                    .with_description("pool withdrawal"),
            );
        }
        Ok(HandlerOutcome::Handled)
    }
}

/// Lockup module: MsgLockTokens, MsgBeginUnlocking, MsgUnlockPeriodLock.
///
/// Locking moves shares into the module without a wallet-relative transfer,
/// so these are recorded as stake/unstake marker rows.
pub struct LockupHandler;

impl MsgHandler for LockupHandler {
    fn name(&self) -> &'static str {
        "osmosis-lockup"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        let (kind, description) = match msg.kind {
            MsgKind::LockTokens => (RowKind::LpStake, "lock lp shares"),
            MsgKind::BeginUnlocking | MsgKind::UnlockPeriodLock => {
                (RowKind::LpUnstake, "unlock lp shares")
            }
            _ => return Ok(HandlerOutcome::NotHandled),
        };
        sink.append(Row::simple(tx, msg.index, description).with_kind(kind));
        Ok(HandlerOutcome::Handled)
    }
}
