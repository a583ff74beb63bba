//! Serializable aggregate holding every entity collection, plus the
//! referential rules the storage layer is responsible for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Account, Category, Identifiable, RecurringTransaction, Transaction, User,
};
use crate::errors::{DomainError, DomainResult};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// In-memory unit of persistence. Entities only carry identifier links;
/// the ledger resolves them and enforces cascade/restrict semantics on
/// removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub recurring_transactions: Vec<RecurringTransaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            users: Vec::new(),
            accounts: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            recurring_transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_user(&mut self, user: User) -> DomainResult<Uuid> {
        let email = user.email().to_string();
        if self.users.iter().any(|existing| existing.email() == email) {
            return Err(DomainError::InvalidArgument(format!(
                "user `{}` already exists",
                email
            )));
        }
        let id = user.id();
        self.users.push(user);
        self.touch();
        Ok(id)
    }

    pub fn add_account(&mut self, account: Account) -> DomainResult<Uuid> {
        self.ensure_user(account.user_id())?;
        let id = account.id();
        self.accounts.push(account);
        self.touch();
        Ok(id)
    }

    pub fn add_category(&mut self, category: Category) -> DomainResult<Uuid> {
        self.ensure_user(category.user_id())?;
        if let Some(parent) = category.parent_id() {
            self.ensure_category(parent)?;
        }
        let id = category.id();
        self.categories.push(category);
        self.touch();
        Ok(id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> DomainResult<Uuid> {
        self.ensure_user(transaction.user_id())?;
        self.ensure_account(transaction.account_id())?;
        if let Some(category) = transaction.category_id() {
            self.ensure_category(category)?;
        }
        if let Some(destination) = transaction.to_account_id() {
            self.ensure_account(destination)?;
        }
        let id = transaction.id();
        self.transactions.push(transaction);
        self.touch();
        Ok(id)
    }

    pub fn add_recurring(&mut self, recurring: RecurringTransaction) -> DomainResult<Uuid> {
        self.ensure_user(recurring.user_id())?;
        self.ensure_account(recurring.account_id())?;
        self.ensure_category(recurring.category_id())?;
        let id = recurring.id();
        self.recurring_transactions.push(recurring);
        self.touch();
        Ok(id)
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    pub fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id() == id)
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id() == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id() == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id() == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id() == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id() == id)
    }

    pub fn recurring(&self, id: Uuid) -> Option<&RecurringTransaction> {
        self.recurring_transactions
            .iter()
            .find(|template| template.id() == id)
    }

    pub fn recurring_mut(&mut self, id: Uuid) -> Option<&mut RecurringTransaction> {
        self.recurring_transactions
            .iter_mut()
            .find(|template| template.id() == id)
    }

    /// Removes a user and everything the user owns.
    pub fn remove_user(&mut self, id: Uuid) -> DomainResult<()> {
        if self.user(id).is_none() {
            return Err(DomainError::NotFound(format!("user {}", id)));
        }
        self.users.retain(|user| user.id() != id);
        self.accounts.retain(|account| account.user_id() != id);
        self.categories.retain(|category| category.user_id() != id);
        self.transactions.retain(|txn| txn.user_id() != id);
        self.recurring_transactions
            .retain(|template| template.user_id() != id);
        tracing::debug!(user = %id, "removed user and dependents");
        self.touch();
        Ok(())
    }

    /// Removal is restricted while any transaction or recurring template
    /// still references the account, including as a transfer destination.
    pub fn remove_account(&mut self, id: Uuid) -> DomainResult<()> {
        if self.account(id).is_none() {
            return Err(DomainError::NotFound(format!("account {}", id)));
        }
        let referenced = self
            .transactions
            .iter()
            .any(|txn| txn.account_id() == id || txn.to_account_id() == Some(id))
            || self
                .recurring_transactions
                .iter()
                .any(|template| template.account_id() == id);
        if referenced {
            return Err(DomainError::ReferenceInUse(format!("account {}", id)));
        }
        self.accounts.retain(|account| account.id() != id);
        self.touch();
        Ok(())
    }

    /// Removal is restricted while any transaction, recurring template,
    /// or child category still references the category.
    pub fn remove_category(&mut self, id: Uuid) -> DomainResult<()> {
        if self.category(id).is_none() {
            return Err(DomainError::NotFound(format!("category {}", id)));
        }
        let referenced = self
            .transactions
            .iter()
            .any(|txn| txn.category_id() == Some(id))
            || self
                .recurring_transactions
                .iter()
                .any(|template| template.category_id() == id)
            || self
                .categories
                .iter()
                .any(|category| category.parent_id() == Some(id));
        if referenced {
            return Err(DomainError::ReferenceInUse(format!("category {}", id)));
        }
        self.categories.retain(|category| category.id() != id);
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    fn ensure_user(&self, id: Uuid) -> DomainResult<()> {
        if self.user(id).is_none() {
            return Err(DomainError::UnknownReference(format!("user {}", id)));
        }
        Ok(())
    }

    fn ensure_account(&self, id: Uuid) -> DomainResult<()> {
        if self.account(id).is_none() {
            return Err(DomainError::UnknownReference(format!("account {}", id)));
        }
        Ok(())
    }

    fn ensure_category(&self, id: Uuid) -> DomainResult<()> {
        if self.category(id).is_none() {
            return Err(DomainError::UnknownReference(format!("category {}", id)));
        }
        Ok(())
    }
}
