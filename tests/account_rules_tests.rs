use finance_core::domain::{Account, AccountType, Identifiable};
use finance_core::errors::DomainError;
use finance_core::money::{Currency, Money};
use uuid::Uuid;

mod common;
use common::{eur, sample_user, usd};

#[test]
fn test_new_account_starts_active_with_zero_balance() {
    let user = sample_user();
    let account =
        Account::new("Everyday", AccountType::Checking, Currency::USD, user.id()).unwrap();
    assert!(account.is_active());
    assert_eq!(account.balance(), Money::zero(Currency::USD));
    assert_eq!(account.currency(), Currency::USD);
}

#[test]
fn test_account_requires_owner_and_name() {
    assert!(matches!(
        Account::new("Everyday", AccountType::Checking, Currency::USD, Uuid::nil()),
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        Account::new("   ", AccountType::Checking, Currency::USD, Uuid::new_v4()),
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(Account::new(&"n".repeat(101), AccountType::Cash, Currency::USD, Uuid::new_v4()).is_err());
}

#[test]
fn test_deposit_and_withdraw_move_the_balance() {
    let user = sample_user();
    let mut account = common::checking_account(&user);
    account.deposit(&usd("200")).unwrap();
    account.withdraw(&usd("75.50")).unwrap();
    assert_eq!(account.balance(), usd("124.50"));
}

#[test]
fn test_withdraw_rejects_overdraft_on_regular_accounts() {
    let user = sample_user();
    let mut account = common::checking_account(&user);
    account.deposit(&usd("50")).unwrap();
    let result = account.withdraw(&usd("50.01"));
    assert!(matches!(result, Err(DomainError::InsufficientFunds { .. })));
    // The failed withdrawal leaves the balance untouched.
    assert_eq!(account.balance(), usd("50"));
}

// Credit cards are the one place the non-negative money rule is
// deliberately suspended: withdrawals decrement the balance directly
// instead of going through Money::subtract, so the balance may go below
// zero.
#[test]
fn test_credit_card_withdraw_may_overdraw() {
    let user = sample_user();
    let mut visa =
        Account::new("Visa", AccountType::CreditCard, Currency::USD, user.id()).unwrap();
    visa.withdraw(&usd("50")).unwrap();
    assert!(visa.balance().is_negative());
    assert_eq!(visa.balance().to_string(), "-50.00 USD");

    // Paying the card down brings the balance back above zero.
    visa.deposit(&usd("80")).unwrap();
    assert_eq!(visa.balance(), usd("30"));
}

#[test]
fn test_balance_currency_is_fixed_at_creation() {
    let user = sample_user();
    let mut account = common::checking_account(&user);
    assert!(matches!(
        account.deposit(&eur("10")),
        Err(DomainError::CurrencyMismatch { .. })
    ));
    assert!(matches!(
        account.withdraw(&eur("10")),
        Err(DomainError::CurrencyMismatch { .. })
    ));

    let mut visa =
        Account::new("Visa", AccountType::CreditCard, Currency::USD, user.id()).unwrap();
    // The credit-card path checks currency before touching the balance.
    assert!(matches!(
        visa.withdraw(&eur("10")),
        Err(DomainError::CurrencyMismatch { .. })
    ));
}

#[test]
fn test_inactive_accounts_refuse_balance_mutations() {
    let user = sample_user();
    let mut account = common::checking_account(&user);
    account.deposit(&usd("10")).unwrap();
    account.deactivate().unwrap();

    assert!(matches!(
        account.deposit(&usd("1")),
        Err(DomainError::AccountInactive)
    ));
    assert!(matches!(
        account.withdraw(&usd("1")),
        Err(DomainError::AccountInactive)
    ));
}

#[test]
fn test_activation_transitions_fail_when_already_in_state() {
    let user = sample_user();
    let mut account = common::checking_account(&user);

    assert!(matches!(
        account.activate(),
        Err(DomainError::InvalidOperation(_))
    ));
    account.deactivate().unwrap();
    assert!(matches!(
        account.deactivate(),
        Err(DomainError::InvalidOperation(_))
    ));
    account.activate().unwrap();
    assert!(account.is_active());
}

#[test]
fn test_update_name_revalidates() {
    let user = sample_user();
    let mut account = common::checking_account(&user);
    account.update_name("Daily driver").unwrap();
    use finance_core::domain::NamedEntity;
    assert_eq!(account.name(), "Daily driver");
    assert!(account.update_name("").is_err());
}
