//! Handler capability contracts.
//!
//! A handler understands one message kind (or one contract family) and emits
//! normalized rows for it. Handlers are registered in a
//! [`HandlerRegistry`](super::registry::HandlerRegistry) and invoked by the
//! dispatcher; they never see raw chain encodings, only the canonical
//! [`Message`](super::transaction::Message) shape.

use anyhow::Result;

use super::sink::RowSink;
use super::transaction::{Message, Transaction};

/// Outcome of a handler invocation.
///
/// `NotHandled` means the handler explicitly declined the message; the
/// dispatcher treats it identically to "no handler found" and routes to the
/// fallback detector. An `Err` from [`MsgHandler::handle`] is the third case:
/// a failure, logged and downgraded to the fallback (re-raised in debug mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    Handled,
    NotHandled,
}

/// Capability bound to a structural message kind.
pub trait MsgHandler: Send + Sync {
    /// Unique name, for logging.
    fn name(&self) -> &'static str;

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome>;
}

/// Capability bound to a contract address or label pattern.
///
/// `label` is the resolved contract label when dispatch went through the
/// label-pattern stage, `None` on an exact address match (no resolution
/// happens in that case).
pub trait ContractHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn handle(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
        label: Option<&str>,
    ) -> Result<HandlerOutcome>;
}
