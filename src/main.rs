//! PIN Ledger CLI
//!
//! Replays a command script against a fresh in-memory ledger and prints a
//! report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > balances.csv
//! cargo run -- --strategy sync commands.csv > balances.csv
//! cargo run -- --report history commands.csv > history.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 commands.csv
//! RUST_LOG=info cargo run -- commands.csv
//! ```
//!
//! Diagnostics go to stderr through `tracing` (filtered by `RUST_LOG`,
//! default `warn`) so stdout only carries the CSV report.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, report not writable)

use pin_ledger::cli;
use pin_ledger::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config, args.to_replay_options())
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
