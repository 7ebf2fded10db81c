//! IBC messages: transfers, packet lifecycle, client updates.
//!
//! Packet-lifecycle messages (recv, ack, timeout) are usually submitted by
//! relayer wallets; for the account under report they only matter when a
//! balance actually moved — incoming packet funds, or a refund after a
//! timeout or failed acknowledgement.

use anyhow::Result;
use tally::engine::{HandlerOutcome, Message, MsgHandler, Row, RowSink, Transaction};

/// MsgTransfer: coins leave the wallet toward another chain.
pub struct IbcTransferHandler;

impl MsgHandler for IbcTransferHandler {
    fn name(&self) -> &'static str {
        "ibc-transfer"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        if msg.transfers_out.is_empty() && msg.transfers_in.is_empty() {
            sink.append(Row::simple(tx, msg.index, "ibc transfer"));
            return Ok(HandlerOutcome::Handled);
        }
        for coin in &msg.transfers_out {
            sink.append(
                Row::transfer_out(tx, msg.index, coin.clone()).with_description("ibc transfer"),
            );
        }
        for coin in &msg.transfers_in {
            sink.append(
                Row::transfer_in(tx, msg.index, coin.clone()).with_description("ibc transfer"),
            );
        }
        Ok(HandlerOutcome::Handled)
    }
}

/// MsgRecvPacket, MsgAcknowledgement, MsgTimeout.
pub struct PacketHandler;

impl MsgHandler for PacketHandler {
    fn name(&self) -> &'static str {
        "ibc-packet"
    }

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        for coin in &msg.transfers_in {
            sink.append(
                Row::transfer_in(tx, msg.index, coin.clone())
                    .with_description(msg.kind.name().to_string()),
            );
        }
        // no balance change: packet plumbing for someone else, nothing to row
        Ok(HandlerOutcome::Handled)
    }
}

/// MsgUpdateClient: pure light-client maintenance, never a balance change.
pub struct UpdateClientHandler;

impl MsgHandler for UpdateClientHandler {
    fn name(&self) -> &'static str {
        "ibc-update-client"
    }

    fn handle(
        &self,
        _sink: &mut dyn RowSink,
        _tx: &Transaction,
        _msg: &Message,
    ) -> Result<HandlerOutcome> {
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
    fn ibc_transfer_out_emits_transfer_row() {
        let msg = message(
            "/ibc.applications.transfer.v1.MsgTransfer",
            json!({}),
            vec![],
            vec![coin(777, "uosmo")],
        );
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        IbcTransferHandler.handle(&mut sink, &tx, &tx.messages[0]).unwrap();

        assert_eq!(sink.rows()[0].kind, RowKind::TransferOut);
    }

    #[test]
    fn recv_packet_credits_the_wallet() {
        let msg = message(
            "/ibc.core.channel.v1.MsgRecvPacket",
            json!({}),
            vec![coin(9, "uatom")],
            vec![],
        );
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        PacketHandler.handle(&mut sink, &tx, &tx.messages[0]).unwrap();

        assert_eq!(sink.rows()[0].kind, RowKind::TransferIn);
        assert_eq!(sink.rows()[0].description, "MsgRecvPacket");
    }

    #[test]
    fn update_client_emits_nothing() {
        let msg = message("/ibc.core.client.v1.MsgUpdateClient", json!({}), vec![], vec![]);
        let tx = transaction(vec![msg]);
        let mut sink = Exporter::new("osmo1me");

        let outcome = UpdateClientHandler
            .handle(&mut sink, &tx, &tx.messages[0])
            .unwrap();

        assert_eq!(outcome, HandlerOutcome::Handled);
        assert!(sink.is_empty());
    }
}
