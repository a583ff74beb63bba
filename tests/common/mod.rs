#![allow(dead_code)]

use chrono::NaiveDate;
use finance_core::domain::{Account, AccountType, User};
use finance_core::money::{Currency, Money};

pub fn usd(raw: &str) -> Money {
    Money::new(raw.parse().unwrap(), Currency::USD).unwrap()
}

pub fn eur(raw: &str) -> Money {
    Money::new(raw.parse().unwrap(), Currency::EUR).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn sample_user() -> User {
    User::new(
        "alice@example.com",
        "0123456789abcdef0123456789abcdef",
        "Alice",
        "Smith",
    )
    .unwrap()
}

pub fn checking_account(user: &User) -> Account {
    use finance_core::domain::Identifiable;
    Account::new("Checking", AccountType::Checking, Currency::USD, user.id()).unwrap()
}
