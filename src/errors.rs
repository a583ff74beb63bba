use thiserror::Error;

use crate::money::{Currency, Money};

pub type DomainResult<T> = Result<T, DomainError>;

/// Error type that captures domain-rule and storage failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Money amount cannot be negative")]
    InvalidAmount,
    #[error("Recurrence interval must be at least 1")]
    InvalidInterval,
    #[error("Range start must not be after range end")]
    InvalidRange,
    #[error("Category cannot be its own parent")]
    SelfParent,
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: Currency, actual: Currency },
    #[error("Subtraction would produce a negative amount")]
    NegativeResult,
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Account is inactive")]
    AccountInactive,
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },
    #[error("Income and expense transactions require a category")]
    MissingCategory,
    #[error("Only transfers may carry a destination account")]
    UnexpectedDestination,
    #[error("Transfers cannot carry a category")]
    UnexpectedCategory,
    #[error("Transfers require a destination account")]
    MissingDestination,
    #[error("Transfer source and destination accounts must differ")]
    SameAccountTransfer,
    #[error("Transaction amount must be positive")]
    NonPositiveAmount,
    #[error("Unknown reference: {0}")]
    UnknownReference(String),
    #[error("Cannot remove {0}: still referenced")]
    ReferenceInUse(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
