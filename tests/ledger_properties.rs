//! Ledger behaviour through the public API
//!
//! Worked scenarios for account creation, deposits, withdrawals and
//! authentication, plus properties that must hold across arbitrary
//! operation sequences and concurrent callers.

use chrono::NaiveDate;
use pin_ledger::core::{AccountAuthenticator, AccountDirectory, FixedClock, LedgerAccount};
use pin_ledger::types::{LedgerError, MONEY_SCALE, TRANSACTION_LIMIT};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

#[fixture]
fn directory() -> AccountDirectory {
    let instant = NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid timestamp");
    AccountDirectory::with_clock(Arc::new(FixedClock::new(instant)))
}

fn messages(account: &LedgerAccount) -> Vec<String> {
    account
        .history()
        .into_iter()
        .map(|entry| entry.message)
        .collect()
}

#[rstest]
fn scenario_a_account_without_initial_deposit(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", None, "1234")
        .unwrap();

    assert_eq!(account.balance(), cents(0));
    assert_eq!(account.balance().scale(), MONEY_SCALE);
    assert_eq!(
        messages(&account),
        vec!["Account created with no initial deposit."]
    );
}

#[rstest]
fn scenario_b_deposit_onto_existing_balance(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", Some(cents(50000)), "1234")
        .unwrap();

    let receipt = account.deposit(cents(25000)).unwrap();

    assert_eq!(receipt.balance, cents(75000));
    assert_eq!(account.balance(), cents(75000));
    assert_eq!(
        messages(&account).last().map(String::as_str),
        Some("Deposited: $250.00 | Balance: $750.00")
    );
}

#[rstest]
fn scenario_c_overdraw_is_refused_and_recorded(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", Some(cents(75000)), "1234")
        .unwrap();
    let entries_before = account.history().len();

    let result = account.withdraw(cents(100000));

    assert_eq!(
        result.unwrap_err(),
        LedgerError::insufficient_funds("ACC1", cents(75000), cents(100000))
    );
    assert_eq!(account.balance(), cents(75000));
    assert_eq!(account.history().len(), entries_before + 1);
    assert_eq!(
        messages(&account).last().map(String::as_str),
        Some("Failed withdrawal attempt: $1000.00 | Balance: $750.00")
    );
}

#[rstest]
fn scenario_d_negative_deposit_leaves_no_trace(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", Some(cents(10000)), "1234")
        .unwrap();
    let before = account.history();

    let result = account.deposit(cents(-500));

    assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
    assert_eq!(account.balance(), cents(10000));
    assert_eq!(account.history(), before);
}

#[rstest]
fn scenario_e_authentication_attempts(directory: AccountDirectory) {
    directory
        .create_account("ACC1", "Alice", Some(cents(10000)), "1234")
        .unwrap();
    let authenticator = AccountAuthenticator::default();

    let granted = authenticator.authenticate(&directory, "ACC1", ["1234"]);
    assert_eq!(granted.unwrap().identifier(), "ACC1");

    let refused = authenticator.authenticate(&directory, "ACC1", ["0000", "1111", "2222"]);
    assert_eq!(refused.unwrap_err(), LedgerError::auth_failed("ACC1", 3));

    let account = directory.get("ACC1").unwrap();
    assert_eq!(account.balance(), cents(10000));
    assert_eq!(account.history().len(), 2);
}

#[rstest]
fn scenario_f_deposit_over_limit(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", None, "1234")
        .unwrap();

    let result = account.deposit(Decimal::new(2_000_000_000, 0));

    assert!(matches!(
        result,
        Err(LedgerError::AmountExceedsLimit { .. })
    ));
    assert_eq!(account.balance(), cents(0));
    assert_eq!(account.history().len(), 1);
}

#[rstest]
fn deposit_at_exact_limit_is_accepted(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", None, "1234")
        .unwrap();

    account.deposit(TRANSACTION_LIMIT).unwrap();
    assert_eq!(account.balance(), TRANSACTION_LIMIT);

    account.withdraw(TRANSACTION_LIMIT).unwrap();
    assert_eq!(account.balance(), cents(0));
}

#[rstest]
fn balance_keeps_scale_and_sign_over_mixed_operations(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", Some(Decimal::new(1, 0)), "1234")
        .unwrap();

    let operations: Vec<(bool, Decimal)> = vec![
        (true, Decimal::new(12345, 3)),
        (false, Decimal::new(5, 3)),
        (false, Decimal::new(999, 0)),
        (true, Decimal::new(1, 2)),
        (false, Decimal::new(1, 3)),
        (true, Decimal::new(-7, 0)),
        (false, Decimal::new(13, 0)),
        (true, Decimal::new(33333, 4)),
        (false, Decimal::new(0, 0)),
        (false, Decimal::new(5, 0)),
    ];

    for (is_deposit, amount) in operations {
        let _ = if is_deposit {
            account.deposit(amount)
        } else {
            account.withdraw(amount)
        };

        let balance = account.balance();
        assert_eq!(balance.scale(), MONEY_SCALE, "balance {} lost its scale", balance);
        assert!(!balance.is_sign_negative(), "balance went negative: {}", balance);
    }
}

#[rstest]
fn history_snapshots_are_idempotent(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", Some(cents(1000)), "1234")
        .unwrap();
    account.withdraw(cents(100)).unwrap();

    let first = account.history();
    let second = account.history();

    assert_eq!(first, second);
    assert_eq!(account.balance(), cents(900));
}

#[rstest]
#[case(cents(1))]
#[case(cents(123456))]
#[case(Decimal::new(5, 3))]
fn deposit_adds_amount_and_exactly_one_entry(
    directory: AccountDirectory,
    #[case] amount: Decimal,
) {
    let account = directory
        .create_account("ACC1", "Alice", Some(cents(500)), "1234")
        .unwrap();
    let balance_before = account.balance();
    let entries_before = account.history().len();

    let receipt = account.deposit(amount).unwrap();

    assert_eq!(account.balance(), balance_before + receipt.amount);
    assert_eq!(account.history().len(), entries_before + 1);
}

#[rstest]
fn withdrawal_audit_asymmetry(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", Some(cents(1000)), "1234")
        .unwrap();
    let baseline = account.history().len();

    assert!(account.withdraw(cents(0)).is_err());
    assert!(account.withdraw(cents(-100)).is_err());
    assert!(account.withdraw(Decimal::new(1_000_000_001, 0)).is_err());
    assert!(account.withdraw(None::<Decimal>).is_err());
    assert_eq!(account.history().len(), baseline);

    assert!(account.withdraw(cents(1001)).is_err());
    assert_eq!(account.history().len(), baseline + 1);
}

#[rstest]
fn concurrent_deposits_on_one_account(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", None, "1234")
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let account = Arc::clone(&account);
            thread::spawn(move || {
                for _ in 0..100 {
                    account.deposit(cents(1)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(account.balance(), cents(800));
    assert_eq!(account.history().len(), 801);
}

#[rstest]
fn concurrent_withdrawals_never_overdraw(directory: AccountDirectory) {
    let account = directory
        .create_account("ACC1", "Alice", Some(cents(1000)), "1234")
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let account = Arc::clone(&account);
            thread::spawn(move || {
                (0..10)
                    .filter(|_| account.withdraw(cents(50)).is_ok())
                    .count()
            })
        })
        .collect();

    let successes: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(successes, 20);
    assert_eq!(account.balance(), cents(0));
    // creation deposit + creation note + 20 withdrawals + 20 refusals
    assert_eq!(account.history().len(), 42);
}

#[rstest]
fn accounts_are_independent(directory: AccountDirectory) {
    let alice = directory
        .create_account("ACC1", "Alice", Some(cents(1000)), "1234")
        .unwrap();
    let bob = directory
        .create_account("ACC2", "Bob", None, "5678")
        .unwrap();
    let bob_before = bob.history();

    alice.deposit(cents(500)).unwrap();
    let _ = alice.withdraw(cents(99999));

    assert_eq!(bob.balance(), cents(0));
    assert_eq!(bob.history(), bob_before);
}

#[rstest]
fn duplicate_identifier_keeps_first_account(directory: AccountDirectory) {
    directory
        .create_account("ACC1", "Alice", Some(cents(1000)), "1234")
        .unwrap();

    let result = directory.create_account("ACC1", "Mallory", Some(cents(5)), "9999");

    assert_eq!(result.unwrap_err(), LedgerError::duplicate_identifier("ACC1"));
    let account = directory.get("ACC1").unwrap();
    assert_eq!(account.holder_name(), "Alice");
    assert!(AccountAuthenticator::verify(&account, Some("1234")));
    assert!(!AccountAuthenticator::verify(&account, Some("9999")));
}
