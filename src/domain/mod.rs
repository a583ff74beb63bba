//! Domain entities and their invariant-enforcing rules.

pub mod account;
pub mod category;
pub mod common;
pub mod recurring;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountType};
pub use category::Category;
pub use common::{Identifiable, NamedEntity};
pub use recurring::{RecurringKind, RecurringTransaction};
pub use transaction::{Transaction, TransactionKind};
pub use user::User;
