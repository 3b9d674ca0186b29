//! Batch processing for the async replay strategy
//!
//! Commands are partitioned by account identifier. Each account's commands
//! run in script order on one tokio task, while different accounts
//! run in parallel. Accounts never interact (there are no transfers), so this
//! yields the same final state as sequential replay.

use std::collections::HashMap;
use std::sync::Arc;

use super::engine::{CommandOutcome, LedgerEngine};
use crate::types::{AccountId, CommandRecord, LedgerError};
use tracing::{error, warn};

/// Outcome of one command, kept alongside the command itself
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The command that was run
    pub record: CommandRecord,

    /// What running it produced
    pub result: Result<CommandOutcome, LedgerError>,
}

/// Partitions batches by account and runs the partitions concurrently
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: Arc<LedgerEngine>,
}

impl BatchProcessor {
    /// Create a processor driving `engine`
    pub fn new(engine: Arc<LedgerEngine>) -> Self {
        Self { engine }
    }

    /// Group commands by account, preserving per-account order
    pub fn partition_by_account(
        &self,
        batch: Vec<CommandRecord>,
    ) -> HashMap<AccountId, Vec<CommandRecord>> {
        let mut account_batches: HashMap<AccountId, Vec<CommandRecord>> = HashMap::new();

        for record in batch {
            account_batches
                .entry(record.account.clone())
                .or_default()
                .push(record);
        }

        account_batches
    }

    /// Run one account's commands in order
    pub async fn process_account_commands(
        &self,
        commands: Vec<CommandRecord>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(commands.len());

        for record in commands {
            let result = self.engine.process(record.clone());
            if let Err(e) = &result {
                warn!(
                    command = record.command.as_str(),
                    account = %record.account,
                    "Command processing error: {}",
                    e
                );
            }
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Run a whole batch, one task per account, and wait for all of them
    pub async fn process_batch(&self, batch: Vec<CommandRecord>) -> Vec<ProcessingResult> {
        let account_batches = self.partition_by_account(batch);

        let mut tasks = Vec::new();
        for (_account, commands) in account_batches {
            let processor = self.clone();
            let task =
                tokio::spawn(async move { processor.process_account_commands(commands).await });
            tasks.push(task);
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(account_results) => results.extend(account_results),
                Err(e) => {
                    error!("Task panicked: {:?}", e);
                }
            }
        }

        results
    }
}
