//! Canonical transaction and message records.
//!
//! The normalizer produces one [`Transaction`] per raw ledger record, regardless
//! of the source chain's encoding. Handlers only ever see this shape.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// A single amount/denomination pair as it appears on chain.
///
/// Amounts stay in the chain's base denomination (`uosmo`, `uatom`, IBC hashes);
/// display conversion is a presentation concern and lives outside the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub amount: BigDecimal,
    pub denom: String,
}

impl Coin {
    pub fn new(amount: BigDecimal, denom: impl Into<String>) -> Self {
        Self {
            amount,
            denom: denom.into(),
        }
    }

    /// Parses a concatenated event amount like `"1234uosmo"` or
    /// `"500ibc/27394FB092D2EC..."`. The numeric prefix is the amount, the rest
    /// is the denomination. Returns `None` for strings with no digit prefix or
    /// no denomination.
    pub fn parse_event_amount(s: &str) -> Option<Self> {
        let split = s.find(|c: char| !c.is_ascii_digit())?;
        if split == 0 {
            return None;
        }
        let (amount, denom) = s.split_at(split);
        let amount = BigDecimal::from_str(amount).ok()?;
        Some(Self::new(amount, denom))
    }

    /// Parses a comma-separated list of event amounts, skipping malformed
    /// entries.
    pub fn parse_event_amounts(s: &str) -> Vec<Self> {
        s.split(',')
            .filter_map(|part| Self::parse_event_amount(part.trim()))
            .collect()
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.denom)
    }
}

/// Structural message-type identifier.
///
/// Parsed from the message's type URL; the registry binds handlers against
/// these. A type URL outside the known set maps to [`MsgKind::Unrecognized`],
/// never to an absent value, so dispatch always has a key to work with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MsgKind {
    // bank
    Send,
    MultiSend,
    // staking
    Delegate,
    Undelegate,
    Redelegate,
    // distribution
    WithdrawReward,
    WithdrawCommission,
    SetWithdrawAddress,
    // gov
    Vote,
    SubmitProposal,
    GovDeposit,
    // ibc
    IbcTransfer,
    RecvPacket,
    Acknowledgement,
    IbcTimeout,
    UpdateClient,
    // gamm / poolmanager swaps
    SwapExactAmountIn,
    SplitRouteSwapExactAmountIn,
    SwapExactAmountOut,
    SplitRouteSwapExactAmountOut,
    // classic liquidity pools
    JoinPool,
    JoinSwapExternAmountIn,
    ExitPool,
    // lockup
    LockTokens,
    BeginUnlocking,
    UnlockPeriodLock,
    // superfluid
    SuperfluidDelegate,
    LockAndSuperfluidDelegate,
    SuperfluidUndelegate,
    SuperfluidUnbondLock,
    CreateFullRangePositionAndSuperfluidDelegate,
    // concentrated liquidity
    CreatePosition,
    AddToPosition,
    CollectIncentives,
    CollectSpreadRewards,
    WithdrawPosition,
    UnlockAndMigrateSharesToFullRangeConcentratedPosition,
    // smart accounts / misc
    AddAuthenticator,
    RemoveAuthenticator,
    SetValidatorPreference,
    // cosmwasm
    ExecuteContract,
    /// Sentinel for type URLs outside the known set. Carries the bare message
    /// name for logging and row descriptions.
    Unrecognized(String),
}

impl MsgKind {
    /// Maps a protobuf type URL (`/cosmos.bank.v1beta1.MsgSend`) to a kind.
    ///
    /// Matching is on the bare message name so the same kind covers the
    /// `gamm` and `poolmanager` module revisions of the swap messages.
    pub fn from_type_url(type_url: &str) -> Self {
        let name = type_url.rsplit('.').next().unwrap_or(type_url);
        match name {
            "MsgSend" => Self::Send,
            "MsgMultiSend" => Self::MultiSend,
            "MsgDelegate" => Self::Delegate,
            "MsgUndelegate" => Self::Undelegate,
            "MsgBeginRedelegate" => Self::Redelegate,
            "MsgWithdrawDelegatorReward" => Self::WithdrawReward,
            "MsgWithdrawValidatorCommission" => Self::WithdrawCommission,
            "MsgSetWithdrawAddress" => Self::SetWithdrawAddress,
            "MsgVote" => Self::Vote,
            "MsgSubmitProposal" => Self::SubmitProposal,
            "MsgDeposit" => Self::GovDeposit,
            "MsgTransfer" => Self::IbcTransfer,
            "MsgRecvPacket" => Self::RecvPacket,
            "MsgAcknowledgement" => Self::Acknowledgement,
            "MsgTimeout" => Self::IbcTimeout,
            "MsgUpdateClient" => Self::UpdateClient,
            "MsgSwapExactAmountIn" => Self::SwapExactAmountIn,
            "MsgSplitRouteSwapExactAmountIn" => Self::SplitRouteSwapExactAmountIn,
            "MsgSwapExactAmountOut" => Self::SwapExactAmountOut,
            "MsgSplitRouteSwapExactAmountOut" => Self::SplitRouteSwapExactAmountOut,
            "MsgJoinPool" => Self::JoinPool,
            "MsgJoinSwapExternAmountIn" => Self::JoinSwapExternAmountIn,
            "MsgExitPool" => Self::ExitPool,
            "MsgLockTokens" => Self::LockTokens,
            "MsgBeginUnlocking" => Self::BeginUnlocking,
            "MsgUnlockPeriodLock" => Self::UnlockPeriodLock,
            "MsgSuperfluidDelegate" => Self::SuperfluidDelegate,
            "MsgLockAndSuperfluidDelegate" => Self::LockAndSuperfluidDelegate,
            "MsgSuperfluidUndelegate" => Self::SuperfluidUndelegate,
            "MsgSuperfluidUnbondLock" => Self::SuperfluidUnbondLock,
            "MsgCreateFullRangePositionAndSuperfluidDelegate" => {
                Self::CreateFullRangePositionAndSuperfluidDelegate
            }
            "MsgCreatePosition" => Self::CreatePosition,
            "MsgAddToPosition" => Self::AddToPosition,
            "MsgCollectIncentives" => Self::CollectIncentives,
            "MsgCollectSpreadRewards" => Self::CollectSpreadRewards,
            "MsgWithdrawPosition" => Self::WithdrawPosition,
            "MsgUnlockAndMigrateSharesToFullRangeConcentratedPosition" => {
                Self::UnlockAndMigrateSharesToFullRangeConcentratedPosition
            }
            "MsgAddAuthenticator" => Self::AddAuthenticator,
            "MsgRemoveAuthenticator" => Self::RemoveAuthenticator,
            "MsgSetValidatorSetPreference" => Self::SetValidatorPreference,
            "MsgExecuteContract" => Self::ExecuteContract,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Bare message name for logging and row descriptions.
    pub fn name(&self) -> &str {
        match self {
            Self::Send => "MsgSend",
            Self::MultiSend => "MsgMultiSend",
            Self::Delegate => "MsgDelegate",
            Self::Undelegate => "MsgUndelegate",
            Self::Redelegate => "MsgBeginRedelegate",
            Self::WithdrawReward => "MsgWithdrawDelegatorReward",
            Self::WithdrawCommission => "MsgWithdrawValidatorCommission",
            Self::SetWithdrawAddress => "MsgSetWithdrawAddress",
            Self::Vote => "MsgVote",
            Self::SubmitProposal => "MsgSubmitProposal",
            Self::GovDeposit => "MsgDeposit",
            Self::IbcTransfer => "MsgTransfer",
            Self::RecvPacket => "MsgRecvPacket",
            Self::Acknowledgement => "MsgAcknowledgement",
            Self::IbcTimeout => "MsgTimeout",
            Self::UpdateClient => "MsgUpdateClient",
            Self::SwapExactAmountIn => "MsgSwapExactAmountIn",
            Self::SplitRouteSwapExactAmountIn => "MsgSplitRouteSwapExactAmountIn",
            Self::SwapExactAmountOut => "MsgSwapExactAmountOut",
            Self::SplitRouteSwapExactAmountOut => "MsgSplitRouteSwapExactAmountOut",
            Self::JoinPool => "MsgJoinPool",
            Self::JoinSwapExternAmountIn => "MsgJoinSwapExternAmountIn",
            Self::ExitPool => "MsgExitPool",
            Self::LockTokens => "MsgLockTokens",
            Self::BeginUnlocking => "MsgBeginUnlocking",
            Self::UnlockPeriodLock => "MsgUnlockPeriodLock",
            Self::SuperfluidDelegate => "MsgSuperfluidDelegate",
            Self::LockAndSuperfluidDelegate => "MsgLockAndSuperfluidDelegate",
            Self::SuperfluidUndelegate => "MsgSuperfluidUndelegate",
            Self::SuperfluidUnbondLock => "MsgSuperfluidUnbondLock",
            Self::CreateFullRangePositionAndSuperfluidDelegate => {
                "MsgCreateFullRangePositionAndSuperfluidDelegate"
            }
            Self::CreatePosition => "MsgCreatePosition",
            Self::AddToPosition => "MsgAddToPosition",
            Self::CollectIncentives => "MsgCollectIncentives",
            Self::CollectSpreadRewards => "MsgCollectSpreadRewards",
            Self::WithdrawPosition => "MsgWithdrawPosition",
            Self::UnlockAndMigrateSharesToFullRangeConcentratedPosition => {
                "MsgUnlockAndMigrateSharesToFullRangeConcentratedPosition"
            }
            Self::AddAuthenticator => "MsgAddAuthenticator",
            Self::RemoveAuthenticator => "MsgRemoveAuthenticator",
            Self::SetValidatorPreference => "MsgSetValidatorSetPreference",
            Self::ExecuteContract => "MsgExecuteContract",
            Self::Unrecognized(name) => name,
        }
    }
}

/// One atomic operation within a transaction.
///
/// `transfers_in` / `transfers_out` are the wallet-relative balance changes the
/// normalizer extracted from this message's event log. They are what the
/// fallback detector and most handlers work from.
#[derive(Debug, Clone)]
pub struct Message {
    /// Position within the transaction; rows are emitted in this order.
    pub index: usize,
    pub kind: MsgKind,
    /// Raw type URL as it appeared on chain.
    pub type_url: String,
    /// Decoded message fields, shape depends on `kind`.
    pub body: serde_json::Value,
    /// Target contract address, set only for contract-execution messages.
    pub contract: Option<String>,
    /// Raw call payload of a contract execution.
    pub execute_payload: Option<serde_json::Value>,
    /// Coins received by the wallet in this message.
    pub transfers_in: Vec<Coin>,
    /// Coins sent from the wallet in this message.
    pub transfers_out: Vec<Coin>,
}

impl Message {
    pub fn new(index: usize, type_url: impl Into<String>, body: serde_json::Value) -> Self {
        let type_url = type_url.into();
        Self {
            index,
            kind: MsgKind::from_type_url(&type_url),
            type_url,
            body,
            contract: None,
            execute_payload: None,
            transfers_in: Vec::new(),
            transfers_out: Vec::new(),
        }
    }
}

/// Canonical transaction record. Immutable once normalized; one dispatcher
/// invocation owns it and discards it after row emission.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub txid: String,
    pub timestamp: DateTime<Utc>,
    pub fee: Option<Coin>,
    /// Authoritative: when set, messages are not processed individually.
    pub is_failed: bool,
    pub messages: Vec<Message>,
    /// Explorer link, when the normalizer was configured with one.
    pub url: Option<String>,
    pub memo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_type_urls() {
        assert_eq!(
            MsgKind::from_type_url("/cosmos.bank.v1beta1.MsgSend"),
            MsgKind::Send
        );
        assert_eq!(
            MsgKind::from_type_url("/osmosis.gamm.v1beta1.MsgSwapExactAmountIn"),
            MsgKind::SwapExactAmountIn
        );
        // poolmanager revision maps to the same kind
        assert_eq!(
            MsgKind::from_type_url("/osmosis.poolmanager.v1beta1.MsgSwapExactAmountIn"),
            MsgKind::SwapExactAmountIn
        );
        assert_eq!(
            MsgKind::from_type_url("/cosmwasm.wasm.v1.MsgExecuteContract"),
            MsgKind::ExecuteContract
        );
    }

    #[test]
    fn unknown_type_url_is_sentinel_not_absent() {
        let kind = MsgKind::from_type_url("/osmosis.someday.v9.MsgBrandNewThing");
        assert_eq!(kind, MsgKind::Unrecognized("MsgBrandNewThing".to_string()));
        assert_eq!(kind.name(), "MsgBrandNewThing");
    }

    #[test]
    fn parses_event_amounts() {
        let coin = Coin::parse_event_amount("1234uosmo").unwrap();
        assert_eq!(coin.amount, BigDecimal::from(1234u32));
        assert_eq!(coin.denom, "uosmo");

        let ibc = Coin::parse_event_amount("500ibc/27394FB092D2ECCD56123C74F36E4C1F").unwrap();
        assert_eq!(ibc.denom, "ibc/27394FB092D2ECCD56123C74F36E4C1F");

        assert!(Coin::parse_event_amount("uosmo").is_none());
        assert!(Coin::parse_event_amount("").is_none());
        assert!(Coin::parse_event_amount("1234").is_none());
    }

    #[test]
    fn parses_comma_separated_amounts() {
        let coins = Coin::parse_event_amounts("1234uosmo,5uion");
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].denom, "uosmo");
        assert_eq!(coins[1].denom, "uion");

        // malformed entries are skipped
        let coins = Coin::parse_event_amounts("1234uosmo,,bogus");
        assert_eq!(coins.len(), 1);
    }
}
