//! Transaction classification and dispatch.
//!
//! For one transaction: short-circuit on failure, then walk messages in
//! declared order, find the handler that understands each one, and degrade
//! gracefully into generic transfer detection when nothing does or the
//! matched handler fails. Dispatch is total in non-debug runs: no error from
//! one message ever reaches a sibling message or another transaction.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use super::fallback::TransferDetector;
use super::handler::{HandlerOutcome, MsgHandler};
use super::label::LabelResolver;
use super::normalize::Normalizer;
use super::registry::HandlerRegistry;
use super::sink::RowSink;
use super::transaction::{Message, MsgKind, Transaction};

/// Explicit dispatch configuration, threaded into the dispatcher rather than
/// read from ambient state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchConfig {
    /// Re-raise a captured handler error after the fallback/log step. Trades
    /// batch robustness for fail-fast visibility; the only mode where dispatch
    /// is not total.
    pub debug: bool,
}

/// The classification engine for one chain.
pub struct Dispatcher {
    normalizer: Arc<dyn Normalizer>,
    registry: Arc<HandlerRegistry>,
    resolver: Arc<dyn LabelResolver>,
    fallback: Arc<dyn TransferDetector>,
    pre_pass: Option<Arc<dyn MsgHandler>>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(
        normalizer: Arc<dyn Normalizer>,
        registry: Arc<HandlerRegistry>,
        resolver: Arc<dyn LabelResolver>,
        fallback: Arc<dyn TransferDetector>,
    ) -> Self {
        Self {
            normalizer,
            registry,
            resolver,
            fallback,
            pre_pass: None,
            config: DispatchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs an optional handler attempted before the registry lookup for
    /// every message. Pipelines without one go straight to the registry.
    pub fn with_pre_pass(mut self, handler: Arc<dyn MsgHandler>) -> Self {
        self.pre_pass = Some(handler);
        self
    }

    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Processes one raw record into rows.
    ///
    /// Returns the normalized transaction; its rows live in the sink, keyed by
    /// txid. In non-debug mode the only error path is normalization of the raw
    /// record itself.
    pub async fn process(
        &self,
        wallet: &str,
        raw: &Value,
        sink: &mut dyn RowSink,
    ) -> Result<Transaction> {
        let tx = self.normalizer.normalize(wallet, raw)?;

        if tx.is_failed {
            tracing::debug!(
                target: "tally::engine::dispatch",
                txid = %tx.txid,
                "failed transaction, emitting fee-only row"
            );
            sink.append_failed_tx(&tx);
            return Ok(tx);
        }

        for msg in &tx.messages {
            if let Err(err) = self.dispatch_message(sink, &tx, msg).await {
                tracing::error!(
                    target: "tally::engine::dispatch",
                    txid = %tx.txid,
                    msg_index = msg.index,
                    kind = msg.kind.name(),
                    error = %format!("{err:#}"),
                    "handler failed, degrading to transfer detection"
                );
                self.fallback.detect(sink, &tx, msg);

                if self.config.debug {
                    return Err(err);
                }
            }
        }

        Ok(tx)
    }

    /// Routes one message. An `Err` here is a handler failure; the caller owns
    /// the fallback-and-maybe-reraise policy.
    async fn dispatch_message(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<()> {
        if let Some(pre_pass) = &self.pre_pass {
            if pre_pass.handle(sink, tx, msg)? == HandlerOutcome::Handled {
                return Ok(());
            }
        }

        let outcome = if msg.kind == MsgKind::ExecuteContract {
            self.dispatch_contract(sink, tx, msg).await?
        } else if let Some(handler) = self.registry.handler_for(&msg.kind) {
            handler.handle(sink, tx, msg)?
        } else {
            HandlerOutcome::NotHandled
        };

        // Never skipped: every unclaimed message still produces a best-effort
        // classification.
        if outcome == HandlerOutcome::NotHandled {
            self.fallback.detect(sink, tx, msg);
        }
        Ok(())
    }

    /// Two-stage contract-execution sub-dispatch: exact address table first,
    /// then label-pattern rules over the resolved label. The exact table wins
    /// without any resolver call; resolution is also skipped entirely when no
    /// label rules are registered.
    async fn dispatch_contract(
        &self,
        sink: &mut dyn RowSink,
        tx: &Transaction,
        msg: &Message,
    ) -> Result<HandlerOutcome> {
        let Some(address) = msg.contract.as_deref() else {
            return Ok(HandlerOutcome::NotHandled);
        };

        if let Some(handler) = self.registry.contract_handler(address) {
            return handler.handle(sink, tx, msg, None);
        }

        if !self.registry.has_label_rules() {
            return Ok(HandlerOutcome::NotHandled);
        }

        let label = self.resolver.resolve(address).await?;
        match self.registry.label_handler(&label) {
            Some(handler) => handler.handle(sink, tx, msg, Some(&label)),
            None => {
                tracing::debug!(
                    target: "tally::engine::dispatch",
                    txid = %tx.txid,
                    contract = %address,
                    label = %label,
                    "no label rule matched"
                );
                Ok(HandlerOutcome::NotHandled)
            }
        }
    }
}
