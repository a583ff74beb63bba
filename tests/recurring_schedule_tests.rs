use finance_core::domain::{RecurringKind, RecurringTransaction};
use finance_core::errors::DomainError;
use finance_core::money::{Currency, Money};
use finance_core::time::RecurrencePeriod;
use uuid::Uuid;

mod common;
use common::{date, usd};

fn rent_template(period: RecurrencePeriod, start: chrono::NaiveDate) -> RecurringTransaction {
    RecurringTransaction::new(
        RecurringKind::Expense,
        usd("1500"),
        "Rent",
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        start,
        period,
    )
    .unwrap()
}

#[test]
fn test_next_occurrence_anchors_at_start_date() {
    let template = rent_template(RecurrencePeriod::monthly(), date(2024, 3, 1));
    assert_eq!(
        template.next_occurrence_after(date(2024, 1, 20)),
        date(2024, 3, 1)
    );
    assert_eq!(
        template.next_occurrence_after(date(2024, 3, 1)),
        date(2024, 4, 1)
    );
}

#[test]
fn test_occurrences_between_walks_monthly_cadence() {
    let template = rent_template(RecurrencePeriod::monthly(), date(2024, 1, 15));
    let occurrences = template
        .occurrences_between(date(2024, 1, 1), date(2024, 4, 30))
        .unwrap();
    assert_eq!(
        occurrences,
        vec![
            date(2024, 1, 15),
            date(2024, 2, 15),
            date(2024, 3, 15),
            date(2024, 4, 15),
        ]
    );
}

#[test]
fn test_occurrences_keep_the_original_anchor_when_range_starts_late() {
    // Biweekly from Jan 1; a range opening mid-cycle must not re-anchor.
    let template = rent_template(RecurrencePeriod::biweekly(), date(2024, 1, 1));
    let occurrences = template
        .occurrences_between(date(2024, 1, 20), date(2024, 2, 28))
        .unwrap();
    assert_eq!(
        occurrences,
        vec![date(2024, 1, 29), date(2024, 2, 12), date(2024, 2, 26)]
    );
}

#[test]
fn test_occurrences_are_ordered_and_bounded_by_the_range() {
    let template = rent_template(RecurrencePeriod::weekly(), date(2024, 6, 3));
    let start = date(2024, 6, 10);
    let end = date(2024, 7, 8);
    let occurrences = template.occurrences_between(start, end).unwrap();

    assert!(!occurrences.is_empty());
    assert!(occurrences.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(occurrences.iter().all(|d| *d >= start && *d <= end));
}

#[test]
fn test_empty_when_range_ends_before_start_date() {
    let template = rent_template(RecurrencePeriod::monthly(), date(2025, 1, 1));
    let occurrences = template
        .occurrences_between(date(2024, 1, 1), date(2024, 12, 31))
        .unwrap();
    assert!(occurrences.is_empty());
}

#[test]
fn test_inverted_range_is_rejected() {
    let template = rent_template(RecurrencePeriod::monthly(), date(2024, 1, 1));
    assert!(matches!(
        template.occurrences_between(date(2024, 2, 1), date(2024, 1, 1)),
        Err(DomainError::InvalidRange)
    ));
}

#[test]
fn test_amount_must_stay_positive() {
    let zero = Money::zero(Currency::USD);
    let result = RecurringTransaction::new(
        RecurringKind::Income,
        zero,
        "Allowance",
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        date(2024, 1, 1),
        RecurrencePeriod::weekly(),
    );
    assert!(matches!(result, Err(DomainError::NonPositiveAmount)));

    let mut template = rent_template(RecurrencePeriod::monthly(), date(2024, 1, 1));
    assert!(template.update_amount(zero).is_err());
    template.update_amount(usd("1600")).unwrap();
    assert_eq!(template.amount(), usd("1600"));
}

#[test]
fn test_activation_transitions_fail_when_already_in_state() {
    let mut template = rent_template(RecurrencePeriod::monthly(), date(2024, 1, 1));
    assert!(template.is_active());
    assert!(matches!(
        template.activate(),
        Err(DomainError::InvalidOperation(_))
    ));
    template.deactivate().unwrap();
    assert!(matches!(
        template.deactivate(),
        Err(DomainError::InvalidOperation(_))
    ));
}
