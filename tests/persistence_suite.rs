use finance_core::domain::{
    Account, AccountType, Category, Identifiable, RecurringKind, RecurringTransaction,
    Transaction,
};
use finance_core::errors::DomainError;
use finance_core::ledger::Ledger;
use finance_core::money::Currency;
use finance_core::storage::{JsonStorage, StorageBackend};
use finance_core::time::RecurrencePeriod;
use serde_json::Value;
use tempfile::tempdir;
use uuid::Uuid;

mod common;
use common::{date, sample_user, usd};

fn populated_ledger() -> Ledger {
    let mut ledger = Ledger::new("Household");
    let user = sample_user();
    let user_id = ledger.add_user(user).unwrap();

    let checking = Account::new("Checking", AccountType::Checking, Currency::USD, user_id).unwrap();
    let checking_id = ledger.add_account(checking).unwrap();
    let savings = Account::new("Savings", AccountType::Savings, Currency::USD, user_id).unwrap();
    let savings_id = ledger.add_account(savings).unwrap();

    let groceries = Category::new("Groceries", user_id).unwrap();
    let groceries_id = ledger.add_category(groceries).unwrap();

    let expense = Transaction::expense(
        usd("45.20"),
        date(2024, 5, 6),
        "weekly shop",
        checking_id,
        groceries_id,
        user_id,
    )
    .unwrap();
    ledger.add_transaction(expense).unwrap();

    let transfer = Transaction::transfer(
        usd("300"),
        date(2024, 5, 7),
        "to savings",
        checking_id,
        savings_id,
        user_id,
    )
    .unwrap();
    ledger.add_transaction(transfer).unwrap();

    let template = RecurringTransaction::new(
        RecurringKind::Expense,
        usd("1500"),
        "Rent",
        checking_id,
        groceries_id,
        user_id,
        date(2024, 1, 1),
        RecurrencePeriod::monthly(),
    )
    .unwrap();
    ledger.add_recurring(template).unwrap();

    ledger
}

#[test]
fn test_adds_validate_references() {
    let mut ledger = Ledger::new("Empty");
    let unknown_user = Uuid::new_v4();

    let account =
        Account::new("Orphan", AccountType::Checking, Currency::USD, unknown_user).unwrap();
    assert!(matches!(
        ledger.add_account(account),
        Err(DomainError::UnknownReference(_))
    ));

    let user_id = ledger.add_user(sample_user()).unwrap();
    let txn = Transaction::expense(
        usd("5"),
        date(2024, 5, 1),
        "lunch",
        Uuid::new_v4(),
        Uuid::new_v4(),
        user_id,
    )
    .unwrap();
    assert!(matches!(
        ledger.add_transaction(txn),
        Err(DomainError::UnknownReference(_))
    ));
}

#[test]
fn test_duplicate_emails_are_rejected() {
    let mut ledger = Ledger::new("Dupes");
    ledger.add_user(sample_user()).unwrap();
    assert!(matches!(
        ledger.add_user(sample_user()),
        Err(DomainError::InvalidArgument(_))
    ));
}

#[test]
fn test_removing_a_user_cascades_to_dependents() {
    let mut ledger = populated_ledger();
    let user_id = ledger.users[0].id();

    ledger.remove_user(user_id).unwrap();
    assert!(ledger.users.is_empty());
    assert!(ledger.accounts.is_empty());
    assert!(ledger.categories.is_empty());
    assert!(ledger.transactions.is_empty());
    assert!(ledger.recurring_transactions.is_empty());

    assert!(matches!(
        ledger.remove_user(user_id),
        Err(DomainError::NotFound(_))
    ));
}

#[test]
fn test_referenced_accounts_cannot_be_removed() {
    let mut ledger = populated_ledger();
    let checking_id = ledger.accounts[0].id();
    // Referenced as a transfer destination only.
    let savings_id = ledger.accounts[1].id();

    assert!(matches!(
        ledger.remove_account(checking_id),
        Err(DomainError::ReferenceInUse(_))
    ));
    assert!(matches!(
        ledger.remove_account(savings_id),
        Err(DomainError::ReferenceInUse(_))
    ));

    let user_id = ledger.users[0].id();
    let idle =
        Account::new("Idle", AccountType::Cash, Currency::USD, user_id).unwrap();
    let idle_id = ledger.add_account(idle).unwrap();
    ledger.remove_account(idle_id).unwrap();
    assert!(ledger.account(idle_id).is_none());
}

#[test]
fn test_referenced_categories_cannot_be_removed() {
    let mut ledger = populated_ledger();
    let groceries_id = ledger.categories[0].id();
    assert!(matches!(
        ledger.remove_category(groceries_id),
        Err(DomainError::ReferenceInUse(_))
    ));

    let user_id = ledger.users[0].id();
    let parent = Category::new("Parent", user_id).unwrap();
    let parent_id = ledger.add_category(parent).unwrap();
    let child = Category::new("Child", user_id)
        .unwrap()
        .with_parent(parent_id)
        .unwrap();
    let child_id = ledger.add_category(child).unwrap();

    assert!(matches!(
        ledger.remove_category(parent_id),
        Err(DomainError::ReferenceInUse(_))
    ));
    ledger.remove_category(child_id).unwrap();
    ledger.remove_category(parent_id).unwrap();
}

#[test]
fn test_ledger_round_trips_through_json_storage() {
    let dir = tempdir().unwrap();
    let store = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();
    let ledger = populated_ledger();

    store.save(&ledger, "household").unwrap();
    let loaded = store.load("household").unwrap();

    let original: Value = serde_json::to_value(&ledger).unwrap();
    let reloaded: Value = serde_json::to_value(&loaded).unwrap();
    assert_eq!(original, reloaded);
}

#[test]
fn test_money_persists_as_amount_and_currency() {
    let ledger = populated_ledger();
    let json: Value = serde_json::to_value(&ledger).unwrap();

    let balance = &json["accounts"][0]["balance"];
    assert!(balance.get("amount").is_some());
    assert_eq!(balance["currency"], "USD");

    let amount = &json["transactions"][0]["amount"];
    assert_eq!(amount["currency"], "USD");
}

#[test]
fn test_overdrawn_credit_card_balances_survive_a_round_trip() {
    let dir = tempdir().unwrap();
    let store = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();

    let mut ledger = Ledger::new("Cards");
    let user_id = ledger.add_user(sample_user()).unwrap();
    let mut visa =
        Account::new("Visa", AccountType::CreditCard, Currency::USD, user_id).unwrap();
    visa.withdraw(&usd("250")).unwrap();
    let visa_id = ledger.add_account(visa).unwrap();

    store.save(&ledger, "cards").unwrap();
    let loaded = store.load("cards").unwrap();
    let reloaded_visa = loaded.account(visa_id).unwrap();
    assert!(reloaded_visa.balance().is_negative());
    assert_eq!(reloaded_visa.balance().to_string(), "-250.00 USD");
}
