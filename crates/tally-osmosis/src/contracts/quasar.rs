//! Quasar concentrated-liquidity vaults.
//!
//! Vaults are instantiated per strategy, so there is no address to hard-code;
//! they are matched by the `quasar-cl-vault-` label prefix.

use anyhow::Result;
use tally::engine::{
    ContractHandler, HandlerOutcome, Message, Row, RowKind, RowSink, Transaction,
};

use super::payload_method;

pub struct QuasarVaultHandler;

impl ContractHandler for QuasarVaultHandler {
    fn name(&self) -> &'static str {
        "osmosis-quasar-vault"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        label: Option<&str>,
    ) -> Result<HandlerOutcome> {
        let vault = label.unwrap_or("quasar vault");

        match payload_method(msg.execute_payload.as_ref()) {
            Some("exact_deposit" | "any_deposit") => {
                for sent in &msg.transfers_out {
                    sink.append(
                        Row::transfer_out(tx, msg.index, sent.clone())
                            .with_kind(RowKind::LpDeposit)
                            .with_description(format!("{vault} deposit")),
                    );
                }
            }
            Some("redeem") => {
                for received in &msg.transfers_in {
                    sink.append(
                        Row::transfer_in(tx, msg.index, received.clone())
                            .with_kind(RowKind::LpWithdraw)
                            .with_description(format!("{vault} withdrawal")),
                    );
                }
            }
            _ => return Ok(HandlerOutcome::NotHandled),
        }
        Ok(HandlerOutcome::Handled)
    }
}
