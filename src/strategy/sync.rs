//! Synchronous replay strategy
//!
//! Single-threaded pipeline: `SyncReader` streams commands one at a time,
//! `LedgerEngine` runs each of them, and the selected report is written once
//! the script is exhausted.

use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ReplayOptions};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Synchronous replay strategy
///
/// ```no_run
/// use pin_ledger::strategy::{ProcessingStrategy, ReplayOptions, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ReplayOptions::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("commands.csv"), &mut output)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyncProcessingStrategy {
    options: ReplayOptions,
}

impl SyncProcessingStrategy {
    /// Create a sync strategy with the given replay options
    pub fn new(options: ReplayOptions) -> Self {
        Self { options }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = self.options.build_engine();
        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(command_record) => {
                    let command = command_record.command;
                    if let Err(e) = engine.process(command_record) {
                        warn!(command = command.as_str(), "Command processing error: {}", e);
                    }
                }
                Err(e) => warn!("CSV parsing error: {}", e),
            }
        }

        self.options.write_report(engine.directory(), output)
    }
}
