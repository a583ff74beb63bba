//! Account entity and its balance-mutation rules.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{bounded_text, require_id, Identifiable, NamedEntity};
use crate::errors::{DomainError, DomainResult};
use crate::money::{Currency, Money};

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    Cash,
    Investment,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::CreditCard => "Credit Card",
            AccountType::Cash => "Cash",
            AccountType::Investment => "Investment",
        };
        f.write_str(label)
    }
}

/// Financial account owned by a user. The balance currency is fixed at
/// creation; only credit-card balances may go below zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    id: Uuid,
    name: String,
    account_type: AccountType,
    balance: Money,
    user_id: Uuid,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Opens an active account with a zero balance in the given currency.
    pub fn new(
        name: &str,
        account_type: AccountType,
        currency: Currency,
        user_id: Uuid,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: bounded_text(name, "account name", 1, 100)?,
            account_type,
            balance: Money::zero(currency),
            user_id: require_id(user_id, "user id")?,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn currency(&self) -> Currency {
        self.balance.currency()
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deposit(&mut self, amount: &Money) -> DomainResult<()> {
        self.ensure_active()?;
        self.balance = self.balance.add(amount)?;
        self.touch();
        Ok(())
    }

    /// Withdraws from the balance. Credit-card accounts may overdraw, so
    /// their decrement bypasses `Money::subtract` and its non-negative
    /// floor; every other type requires sufficient funds.
    pub fn withdraw(&mut self, amount: &Money) -> DomainResult<()> {
        self.ensure_active()?;
        if amount.currency() != self.balance.currency() {
            return Err(DomainError::CurrencyMismatch {
                expected: self.balance.currency(),
                actual: amount.currency(),
            });
        }
        if self.account_type == AccountType::CreditCard {
            self.balance = Money::signed(
                self.balance.amount() - amount.amount(),
                self.balance.currency(),
            );
        } else {
            if self.balance.lt(amount)? {
                return Err(DomainError::InsufficientFunds {
                    balance: self.balance,
                    requested: *amount,
                });
            }
            self.balance = self.balance.subtract(amount)?;
        }
        self.touch();
        Ok(())
    }

    pub fn update_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = bounded_text(name, "account name", 1, 100)?;
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.is_active {
            return Err(DomainError::InvalidOperation(
                "account is already active".into(),
            ));
        }
        self.is_active = true;
        self.touch();
        Ok(())
    }

    pub fn deactivate(&mut self) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::InvalidOperation(
                "account is already inactive".into(),
            ));
        }
        self.is_active = false;
        self.touch();
        Ok(())
    }

    fn ensure_active(&self) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::AccountInactive);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}
