//! Transaction entity: income, expense, and transfer records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{bounded_text, require_id, Identifiable};
use crate::errors::{DomainError, DomainResult};
use crate::money::Money;

const MAX_DESCRIPTION_LEN: usize = 500;

/// Classifies a transaction. The legal optional fields depend on the kind:
/// income and expense carry a category, transfers carry a destination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}

/// Ledger entry against an account. Soft-deleted rather than removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    id: Uuid,
    kind: TransactionKind,
    amount: Money,
    date: NaiveDate,
    description: String,
    account_id: Uuid,
    user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to_account_id: Option<Uuid>,
    is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Validating constructor over the flat field set. The per-kind
    /// factories below are the usual entry points; this one exists so the
    /// full rule matrix stays checkable from a single place.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        date: NaiveDate,
        description: &str,
        account_id: Uuid,
        user_id: Uuid,
        category_id: Option<Uuid>,
        to_account_id: Option<Uuid>,
    ) -> DomainResult<Self> {
        let account_id = require_id(account_id, "account id")?;
        let user_id = require_id(user_id, "user id")?;
        if let Some(category) = category_id {
            require_id(category, "category id")?;
        }
        if let Some(destination) = to_account_id {
            require_id(destination, "destination account id")?;
        }
        validate_rules(kind, &amount, account_id, category_id, to_account_id)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            date,
            description: validate_description(description)?,
            account_id,
            user_id,
            category_id,
            to_account_id,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn income(
        amount: Money,
        date: NaiveDate,
        description: &str,
        account_id: Uuid,
        category_id: Uuid,
        user_id: Uuid,
    ) -> DomainResult<Self> {
        Self::new(
            TransactionKind::Income,
            amount,
            date,
            description,
            account_id,
            user_id,
            Some(category_id),
            None,
        )
    }

    pub fn expense(
        amount: Money,
        date: NaiveDate,
        description: &str,
        account_id: Uuid,
        category_id: Uuid,
        user_id: Uuid,
    ) -> DomainResult<Self> {
        Self::new(
            TransactionKind::Expense,
            amount,
            date,
            description,
            account_id,
            user_id,
            Some(category_id),
            None,
        )
    }

    pub fn transfer(
        amount: Money,
        date: NaiveDate,
        description: &str,
        account_id: Uuid,
        to_account_id: Uuid,
        user_id: Uuid,
    ) -> DomainResult<Self> {
        Self::new(
            TransactionKind::Transfer,
            amount,
            date,
            description,
            account_id,
            user_id,
            None,
            Some(to_account_id),
        )
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }

    pub fn to_account_id(&self) -> Option<Uuid> {
        self.to_account_id
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn update_description(&mut self, description: &str) -> DomainResult<()> {
        self.description = validate_description(description)?;
        self.touch();
        Ok(())
    }

    pub fn delete(&mut self) -> DomainResult<()> {
        if self.is_deleted {
            return Err(DomainError::InvalidOperation(
                "transaction is already deleted".into(),
            ));
        }
        self.is_deleted = true;
        self.deleted_at = Some(Utc::now());
        self.touch();
        Ok(())
    }

    pub fn restore(&mut self) -> DomainResult<()> {
        if !self.is_deleted {
            return Err(DomainError::InvalidOperation(
                "transaction is not deleted".into(),
            ));
        }
        self.is_deleted = false;
        self.deleted_at = None;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

fn validate_description(description: &str) -> DomainResult<String> {
    bounded_text(description, "transaction description", 1, MAX_DESCRIPTION_LEN)
}

fn validate_rules(
    kind: TransactionKind,
    amount: &Money,
    account_id: Uuid,
    category_id: Option<Uuid>,
    to_account_id: Option<Uuid>,
) -> DomainResult<()> {
    if amount.amount() <= Decimal::ZERO {
        return Err(DomainError::NonPositiveAmount);
    }
    match kind {
        TransactionKind::Income | TransactionKind::Expense => {
            if category_id.is_none() {
                return Err(DomainError::MissingCategory);
            }
            if to_account_id.is_some() {
                return Err(DomainError::UnexpectedDestination);
            }
        }
        TransactionKind::Transfer => {
            if category_id.is_some() {
                return Err(DomainError::UnexpectedCategory);
            }
            match to_account_id {
                None => return Err(DomainError::MissingDestination),
                Some(destination) if destination == account_id => {
                    return Err(DomainError::SameAccountTransfer)
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}
