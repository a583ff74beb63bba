//! Date intervals and recurrence cadence rules.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Inclusive date interval. Both endpoints are date-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Truncates both timestamps to their calendar date before validating.
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        Self::new(start.date_naive(), end.date_naive())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whole-day span, counting both endpoints.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Ranges sharing a boundary day count as overlapping.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn is_within(&self, other: &DateRange) -> bool {
        self.start >= other.start && self.end <= other.end
    }

    pub fn today() -> Self {
        Self::today_from(current_date())
    }

    pub fn today_from(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today,
        }
    }

    pub fn yesterday() -> Self {
        Self::yesterday_from(current_date())
    }

    pub fn yesterday_from(today: NaiveDate) -> Self {
        let day = today - Duration::days(1);
        Self {
            start: day,
            end: day,
        }
    }

    pub fn this_week() -> Self {
        Self::this_week_from(current_date())
    }

    /// Weeks run Sunday through Saturday.
    pub fn this_week_from(today: NaiveDate) -> Self {
        let start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn last_week() -> Self {
        Self::last_week_from(current_date())
    }

    pub fn last_week_from(today: NaiveDate) -> Self {
        let this_week = Self::this_week_from(today);
        Self {
            start: this_week.start - Duration::days(7),
            end: this_week.start - Duration::days(1),
        }
    }

    pub fn this_month() -> Self {
        Self::this_month_from(current_date())
    }

    pub fn this_month_from(today: NaiveDate) -> Self {
        let start = first_of_month(today);
        Self {
            start,
            end: end_of_month(start),
        }
    }

    pub fn last_month() -> Self {
        Self::last_month_from(current_date())
    }

    pub fn last_month_from(today: NaiveDate) -> Self {
        let start = shift_months(first_of_month(today), -1);
        Self {
            start,
            end: end_of_month(start),
        }
    }

    pub fn this_year() -> Self {
        Self::this_year_from(current_date())
    }

    pub fn this_year_from(today: NaiveDate) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap(),
        }
    }

    pub fn last_year() -> Self {
        Self::last_year_from(current_date())
    }

    pub fn last_year_from(today: NaiveDate) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(today.year() - 1, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(today.year() - 1, 12, 31).unwrap(),
        }
    }

    pub fn last_30_days() -> Self {
        Self::last_30_days_from(current_date())
    }

    pub fn last_30_days_from(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(29),
            end: today,
        }
    }

    pub fn last_90_days() -> Self {
        Self::last_90_days_from(current_date())
    }

    pub fn last_90_days_from(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(89),
            end: today,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Enumerates supported recurrence cadences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecurrenceKind::Daily => "Day",
            RecurrenceKind::Weekly => "Week",
            RecurrenceKind::Monthly => "Month",
            RecurrenceKind::Yearly => "Year",
        };
        f.write_str(label)
    }
}

/// Recurrence rule: a cadence and a positive multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrencePeriod {
    kind: RecurrenceKind,
    interval: u32,
}

impl RecurrencePeriod {
    pub fn new(kind: RecurrenceKind, interval: u32) -> DomainResult<Self> {
        if interval == 0 {
            return Err(DomainError::InvalidInterval);
        }
        Ok(Self { kind, interval })
    }

    pub fn daily() -> Self {
        Self {
            kind: RecurrenceKind::Daily,
            interval: 1,
        }
    }

    pub fn weekly() -> Self {
        Self {
            kind: RecurrenceKind::Weekly,
            interval: 1,
        }
    }

    pub fn biweekly() -> Self {
        Self {
            kind: RecurrenceKind::Weekly,
            interval: 2,
        }
    }

    pub fn monthly() -> Self {
        Self {
            kind: RecurrenceKind::Monthly,
            interval: 1,
        }
    }

    pub fn quarterly() -> Self {
        Self {
            kind: RecurrenceKind::Monthly,
            interval: 3,
        }
    }

    pub fn yearly() -> Self {
        Self {
            kind: RecurrenceKind::Yearly,
            interval: 1,
        }
    }

    pub fn kind(&self) -> RecurrenceKind {
        self.kind
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Calculates the next occurrence after `from`. Month and year steps
    /// clamp to the last day of the target month.
    pub fn next_occurrence(&self, from: NaiveDate) -> NaiveDate {
        match self.kind {
            RecurrenceKind::Daily => from + Duration::days(self.interval as i64),
            RecurrenceKind::Weekly => from + Duration::weeks(self.interval as i64),
            RecurrenceKind::Monthly => shift_months(from, self.interval as i32),
            RecurrenceKind::Yearly => shift_years(from, self.interval as i32),
        }
    }

    pub fn label(&self) -> String {
        match (self.interval, self.kind) {
            (1, RecurrenceKind::Daily) => "Daily".into(),
            (1, RecurrenceKind::Weekly) => "Weekly".into(),
            (1, RecurrenceKind::Monthly) => "Monthly".into(),
            (1, RecurrenceKind::Yearly) => "Yearly".into(),
            (n, kind) => format!("Every {} {}s", n, kind),
        }
    }
}

impl fmt::Display for RecurrencePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), days_in_month(date.year(), date.month()))
        .unwrap()
}

fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    (first_next - Duration::days(1)).day()
}
