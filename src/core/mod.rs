//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Clock abstraction for transaction timestamps
//! - `credential` - PIN hashing and constant-time verification
//! - `account` - The account ledger entity (balance, log, invariants)
//! - `directory` - Identifier-to-account registry
//! - `authenticator` - PIN verification and bounded-attempt sessions
//! - `engine` - Command processing orchestration
//! - `batch_processor` - Per-account parallel execution for async replay

pub mod account;
pub mod authenticator;
pub mod batch_processor;
pub mod credential;
pub mod directory;
pub mod engine;
pub mod traits;

pub use account::LedgerAccount;
pub use authenticator::{validate_new_pin, AccountAuthenticator, MAX_PIN_ATTEMPTS};
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use credential::CredentialHash;
pub use directory::AccountDirectory;
pub use engine::{CommandOutcome, LedgerEngine};
pub use traits::{Clock, FixedClock, SystemClock};
