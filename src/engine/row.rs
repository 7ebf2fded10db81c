//! Normalized accounting rows.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::transaction::{Coin, Transaction};

/// Classification of an emitted row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKind {
    TransferIn,
    TransferOut,
    Trade,
    Fee,
    StakingReward,
    LpDeposit,
    LpWithdraw,
    LpStake,
    LpUnstake,
    /// Message understood but carrying no balance change worth a dedicated
    /// kind (votes, withdraw-address changes, authenticator management).
    Simple,
    /// Best-effort classification from the fallback detector.
    Unknown,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransferIn => "transfer-in",
            Self::TransferOut => "transfer-out",
            Self::Trade => "trade",
            Self::Fee => "fee",
            Self::StakingReward => "staking-reward",
            Self::LpDeposit => "lp-deposit",
            Self::LpWithdraw => "lp-withdraw",
            Self::LpStake => "lp-stake",
            Self::LpUnstake => "lp-unstake",
            Self::Simple => "simple",
            Self::Unknown => "unknown",
        }
    }
}

/// One emitted accounting event. Append-only: never mutated after emission,
/// owned by the sink for the remainder of the export pipeline.
#[derive(Debug, Clone)]
pub struct Row {
    /// Back-reference to the owning transaction.
    pub txid: String,
    pub timestamp: DateTime<Utc>,
    pub kind: RowKind,
    /// Coin received by the wallet, if any.
    pub received: Option<Coin>,
    /// Coin sent from the wallet, if any.
    pub sent: Option<Coin>,
    pub counterparty: Option<String>,
    pub description: String,
    /// Index of the originating message; `None` for transaction-level rows
    /// such as the failed-transaction fee row.
    pub msg_index: Option<usize>,
}

impl Row {
    fn base(tx: &Transaction, kind: RowKind, description: impl Into<String>) -> Self {
        Self {
            txid: tx.txid.clone(),
            timestamp: tx.timestamp,
            kind,
            received: None,
            sent: None,
            counterparty: None,
            description: description.into(),
            msg_index: None,
        }
    }

    pub fn transfer_in(tx: &Transaction, msg_index: usize, coin: Coin) -> Self {
        let mut row = Self::base(tx, RowKind::TransferIn, "");
        row.received = Some(coin);
        row.msg_index = Some(msg_index);
        row
    }

    pub fn transfer_out(tx: &Transaction, msg_index: usize, coin: Coin) -> Self {
        let mut row = Self::base(tx, RowKind::TransferOut, "");
        row.sent = Some(coin);
        row.msg_index = Some(msg_index);
        row
    }

    pub fn trade(tx: &Transaction, msg_index: usize, received: Coin, sent: Coin) -> Self {
        let mut row = Self::base(tx, RowKind::Trade, "");
        row.received = Some(received);
        row.sent = Some(sent);
        row.msg_index = Some(msg_index);
        row
    }

    pub fn staking_reward(tx: &Transaction, msg_index: usize, coin: Coin) -> Self {
        let mut row = Self::base(tx, RowKind::StakingReward, "");
        row.received = Some(coin);
        row.msg_index = Some(msg_index);
        row
    }

    /// Fee-only row for a failed transaction. Amount defaults to zero when the
    /// record carried no fee.
    pub fn fee(tx: &Transaction) -> Self {
        let mut row = Self::base(tx, RowKind::Fee, "transaction failed");
        row.sent = Some(
            tx.fee
                .clone()
                .unwrap_or_else(|| Coin::new(BigDecimal::from(0u32), "")),
        );
        row
    }

    pub fn simple(tx: &Transaction, msg_index: usize, description: impl Into<String>) -> Self {
        let mut row = Self::base(tx, RowKind::Simple, description);
        row.msg_index = Some(msg_index);
        row
    }

    pub fn unknown(tx: &Transaction, msg_index: usize) -> Self {
        let mut row = Self::base(tx, RowKind::Unknown, "unrecognized operation");
        row.msg_index = Some(msg_index);
        row
    }

    pub fn with_kind(mut self, kind: RowKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }
}
