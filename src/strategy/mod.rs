//! Replay strategy module
//!
//! A strategy is a complete pipeline: read the command script, run every
//! command against a fresh ledger, then write the selected report. Sync and
//! async implementations are selected at runtime and produce identical
//! reports for the same script.

use crate::cli::{ReportKind, StrategyType};
use crate::core::{AccountAuthenticator, AccountDirectory, Clock, LedgerEngine, SystemClock};
use crate::io::csv_format::{write_accounts_csv, write_history_csv};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Replay strategy trait
pub trait ProcessingStrategy: Send + Sync {
    /// Replay the script at `input_path` and write the report to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The report cannot be written
    ///
    /// Individual command failures are logged and replay continues with the
    /// next command.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Settings shared by every strategy
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// Which report to write once replay finishes
    pub report: ReportKind,

    /// PIN attempts allowed per authentication
    pub max_pin_attempts: usize,

    /// Time source for log entry timestamps
    pub clock: Arc<dyn Clock>,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            report: ReportKind::default(),
            max_pin_attempts: crate::core::MAX_PIN_ATTEMPTS,
            clock: Arc::new(SystemClock),
        }
    }
}

impl ReplayOptions {
    /// Build an engine over an empty directory using these options
    pub fn build_engine(&self) -> LedgerEngine {
        let directory = Arc::new(AccountDirectory::with_clock(Arc::clone(&self.clock)));
        LedgerEngine::new(directory, AccountAuthenticator::new(self.max_pin_attempts))
    }

    /// Write the selected report for every account in `directory`
    pub fn write_report(
        &self,
        directory: &AccountDirectory,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let written = match self.report {
            ReportKind::Balances => write_accounts_csv(&directory.summaries(), output),
            ReportKind::History => write_history_csv(&directory.histories(), output),
        };
        written.map_err(|e| format!("Failed to write report: {}", e))
    }
}

/// Create a replay strategy
///
/// `config` only applies to the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    options: ReplayOptions,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(options)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, options))
        }
    }
}
