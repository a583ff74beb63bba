//! Recurring transaction templates and occurrence enumeration.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{bounded_text, require_id, Identifiable};
use crate::errors::{DomainError, DomainResult};
use crate::money::Money;
use crate::time::RecurrencePeriod;

const MAX_WALK_OCCURRENCES: usize = 1024;

/// Recurring templates describe money moving in or out; transfer
/// templates do not exist, so the kind set is narrower than
/// `TransactionKind`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurringKind {
    Income,
    Expense,
}

impl fmt::Display for RecurringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecurringKind::Income => "Income",
            RecurringKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Template that yields concrete occurrence dates on demand. It never
/// persists generated transactions itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringTransaction {
    id: Uuid,
    kind: RecurringKind,
    amount: Money,
    description: String,
    account_id: Uuid,
    category_id: Uuid,
    user_id: Uuid,
    start_date: NaiveDate,
    period: RecurrencePeriod,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RecurringTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: RecurringKind,
        amount: Money,
        description: &str,
        account_id: Uuid,
        category_id: Uuid,
        user_id: Uuid,
        start_date: NaiveDate,
        period: RecurrencePeriod,
    ) -> DomainResult<Self> {
        validate_amount(&amount)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            description: bounded_text(description, "description", 1, 500)?,
            account_id: require_id(account_id, "account id")?,
            category_id: require_id(category_id, "category id")?,
            user_id: require_id(user_id, "user id")?,
            start_date,
            period,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn kind(&self) -> RecurringKind {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn period(&self) -> RecurrencePeriod {
        self.period
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

    /// Next occurrence strictly relative to `from`. Dates before the start
    /// anchor the series: the first occurrence is the start date itself.
    pub fn next_occurrence_after(&self, from: NaiveDate) -> NaiveDate {
        if from < self.start_date {
            self.start_date
        } else {
            self.period.next_occurrence(from)
        }
    }

    /// Enumerates occurrence dates inside the inclusive range, walking
    /// forward from the start date so the cadence never re-anchors at the
    /// range boundary. The walk is capped to keep pathological
    /// short-interval/wide-range requests bounded.
    pub fn occurrences_between(
        &self,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> DomainResult<Vec<NaiveDate>> {
        if range_start > range_end {
            return Err(DomainError::InvalidRange);
        }
        let mut occurrences = Vec::new();
        let mut current = self.start_date;
        let mut walked = 0usize;
        while current <= range_end && walked < MAX_WALK_OCCURRENCES {
            if current >= range_start {
                occurrences.push(current);
            }
            current = self.period.next_occurrence(current);
            walked += 1;
        }
        Ok(occurrences)
    }

    pub fn update_amount(&mut self, amount: Money) -> DomainResult<()> {
        validate_amount(&amount)?;
        self.amount = amount;
        self.touch();
        Ok(())
    }

    pub fn update_description(&mut self, description: &str) -> DomainResult<()> {
        self.description = bounded_text(description, "description", 1, 500)?;
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.is_active {
            return Err(DomainError::InvalidOperation(
                "recurring transaction is already active".into(),
            ));
        }
        self.is_active = true;
        self.touch();
        Ok(())
    }

    pub fn deactivate(&mut self) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::InvalidOperation(
                "recurring transaction is already inactive".into(),
            ));
        }
        self.is_active = false;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for RecurringTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

fn validate_amount(amount: &Money) -> DomainResult<()> {
    if amount.amount() <= Decimal::ZERO {
        return Err(DomainError::NonPositiveAmount);
    }
    Ok(())
}
