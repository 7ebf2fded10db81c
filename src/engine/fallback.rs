//! Generic best-effort transfer detection.
//!
//! The universal bottom of dispatch: invoked for every message no specific
//! handler claimed, and in place of any handler that failed. By contract it
//! never fails and every message yields at least one visible classification.

use super::row::{Row, RowKind};
use super::sink::RowSink;
use super::transaction::{Message, Transaction};

/// Fallback classifier contract.
///
/// `detect` must be total: internal errors are swallowed and, at worst,
/// nothing is emitted. The pipeline stays alive no matter what this sees.
pub trait TransferDetector: Send + Sync {
    fn detect(&self, sink: &mut dyn RowSink, tx: &Transaction, msg: &Message);
}

/// Classifies a message from its wallet-relative balance changes alone.
///
/// - one coin in, one coin out: a single unknown-kind row carrying both sides
///   (looks like a trade, but the engine cannot vouch for it);
/// - receives only / sends only: one transfer row per coin, marked unknown;
/// - no balance change: one bare unknown row, so the degraded classification
///   stays visible downstream.
pub struct EventTransferDetector;

impl TransferDetector for EventTransferDetector {
    fn detect(&self, sink: &mut dyn RowSink, tx: &Transaction, msg: &Message) {
        tracing::debug!(
            target: "tally::engine::fallback",
            txid = %tx.txid,
            msg_index = msg.index,
            kind = msg.kind.name(),
            ins = msg.transfers_in.len(),
            outs = msg.transfers_out.len(),
            "detecting transfers for unhandled message"
        );

        let description = format!("unrecognized {}", msg.kind.name());

        match (msg.transfers_in.as_slice(), msg.transfers_out.as_slice()) {
            ([received], [sent]) => {
                sink.append(
                    Row::trade(tx, msg.index, received.clone(), sent.clone())
                        .with_kind(RowKind::Unknown)
                        .with_description(description),
                );
            }
            ([], []) => {
                sink.append(Row::unknown(tx, msg.index).with_description(description));
            }
            (ins, outs) => {
                for coin in ins {
                    sink.append(
                        Row::transfer_in(tx, msg.index, coin.clone())
                            .with_description(description.clone()),
                    );
                }
                for coin in outs {
                    sink.append(
                        Row::transfer_out(tx, msg.index, coin.clone())
                            .with_description(description.clone()),
                    );
                }
            }
        }
    }
}
