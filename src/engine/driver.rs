//! Sequential batch driving with advisory progress reporting.

use anyhow::Result;
use serde_json::Value;

use super::dispatch::Dispatcher;
use super::sink::RowSink;

/// Progress phase reported while the driver walks a transaction list.
pub const PHASE_PROCESS_TRANSACTIONS: &str = "process_transactions";

const DEFAULT_PROGRESS_CADENCE: usize = 100;

/// Coarse progress notifications. Advisory only: reporting never alters
/// processing order or outcome, and the driver completes the batch with or
/// without a reporter.
pub trait Progress: Send + Sync {
    fn report(&self, count: usize, message: &str, phase: &str);
}

/// Progress reporter that logs through `tracing`.
pub struct LogProgress;

impl Progress for LogProgress {
    fn report(&self, count: usize, message: &str, phase: &str) {
        tracing::info!(
            target: "tally::engine::driver",
            count,
            phase,
            "{message}"
        );
    }
}

/// Drives the dispatcher over an ordered transaction history.
///
/// Transactions are processed strictly sequentially in the supplied
/// (chronological) order; rows must land in on-chain order for downstream
/// reconciliation. There is no mid-transaction abort: a caller wishing to stop
/// simply stops between transactions.
pub struct BatchDriver {
    dispatcher: Dispatcher,
    cadence: usize,
}

impl BatchDriver {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            cadence: DEFAULT_PROGRESS_CADENCE,
        }
    }

    /// Overrides the progress cadence (report every `cadence` transactions).
    pub fn with_cadence(mut self, cadence: usize) -> Self {
        self.cadence = cadence.max(1);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Processes the whole batch.
    ///
    /// Non-debug runs always complete the full list: a record that fails to
    /// process is logged and skipped. In debug mode the first error halts the
    /// batch.
    pub async fn process_all(
        &self,
        wallet: &str,
        raws: &[Value],
        sink: &mut dyn RowSink,
        progress: Option<&dyn Progress>,
    ) -> Result<()> {
        let total = raws.len();

        for (i, raw) in raws.iter().enumerate() {
            if let Some(progress) = progress {
                if i % self.cadence == 0 {
                    progress.report(
                        i,
                        &format!("Processed {i} of {total} transactions"),
                        PHASE_PROCESS_TRANSACTIONS,
                    );
                }
            }

            if let Err(err) = self.dispatcher.process(wallet, raw, sink).await {
                if self.dispatcher.config().debug {
                    return Err(err);
                }
                tracing::warn!(
                    target: "tally::engine::driver",
                    index = i,
                    error = %format!("{err:#}"),
                    "skipping transaction that failed to process"
                );
            }
        }

        if let Some(progress) = progress {
            progress.report(
                total,
                &format!("Processed all {total} transactions"),
                PHASE_PROCESS_TRANSACTIONS,
            );
        }
        Ok(())
    }
}
