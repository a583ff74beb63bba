pub mod json_backend;

use std::path::Path;

use crate::errors::DomainResult;
use crate::ledger::Ledger;

/// Abstraction over persistence backends capable of storing ledgers.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> DomainResult<()>;
    fn load(&self, name: &str) -> DomainResult<Ledger>;
    fn list(&self) -> DomainResult<Vec<String>>;
    fn delete(&self, name: &str) -> DomainResult<()>;

    /// Ad-hoc file operations. Default implementations forward to the JSON
    /// helpers when not overridden.
    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> DomainResult<()> {
        json_backend::save_ledger_to_path(ledger, path)
    }

    fn load_from_path(&self, path: &Path) -> DomainResult<Ledger> {
        json_backend::load_ledger_from_path(path)
    }
}

pub use json_backend::JsonStorage;
