//! Row sink contract and the in-memory exporter.

use super::row::{Row, RowKind};
use super::transaction::Transaction;

/// Destination for emitted rows.
///
/// The engine only requires "append row(s) for this transaction"; formatting
/// and persistence belong to the export layer behind this trait.
pub trait RowSink: Send {
    fn append(&mut self, row: Row);

    /// Records a failed transaction as a single fee-only row. No message of a
    /// failed transaction is ever examined.
    fn append_failed_tx(&mut self, tx: &Transaction) {
        self.append(Row::fee(tx));
    }
}

/// In-memory row accumulator.
///
/// Rows are kept in emission order, which for a transaction matches on-chain
/// message order; downstream reconciliation depends on that.
pub struct Exporter {
    wallet: String,
    rows: Vec<Row>,
}

impl Exporter {
    pub fn new(wallet: impl Into<String>) -> Self {
        Self {
            wallet: wallet.into(),
            rows: Vec::new(),
        }
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_for_tx<'a>(&'a self, txid: &'a str) -> impl Iterator<Item = &'a Row> {
        self.rows.iter().filter(move |row| row.txid == txid)
    }

    pub fn count_kind(&self, kind: &RowKind) -> usize {
        self.rows.iter().filter(|row| &row.kind == kind).count()
    }
}

impl RowSink for Exporter {
    fn append(&mut self, row: Row) {
        tracing::debug!(
            target: "tally::engine::sink",
            txid = %row.txid,
            kind = row.kind.as_str(),
            "row appended"
        );
        self.rows.push(row);
    }
}
