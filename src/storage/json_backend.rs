//! JSON file backend: one pretty-printed document per ledger.

use std::{
    env, fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{DomainError, DomainResult};
use crate::ledger::Ledger;

use super::StorageBackend;

const DEFAULT_DIR_NAME: &str = ".finance_core";
const LEDGER_DIR: &str = "ledgers";
const TMP_SUFFIX: &str = "tmp";

/// File-per-ledger storage rooted under a data directory. Writes go
/// through a temporary sibling and a rename so a crash never leaves a
/// half-written ledger behind.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    ledgers_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> DomainResult<Self> {
        let root = root.unwrap_or_else(default_root);
        let ledgers_dir = root.join(LEDGER_DIR);
        ensure_dir(&root)?;
        ensure_dir(&ledgers_dir)?;
        Ok(Self { root, ledgers_dir })
    }

    pub fn new_default() -> DomainResult<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.json", canonical_name(name)))
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger, name: &str) -> DomainResult<()> {
        let path = self.ledger_path(name);
        save_ledger_to_path(ledger, &path)?;
        tracing::info!(ledger = %name, path = %path.display(), "ledger saved");
        Ok(())
    }

    fn load(&self, name: &str) -> DomainResult<Ledger> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(DomainError::NotFound(format!("ledger `{}`", name)));
        }
        let ledger = load_ledger_from_path(&path)?;
        tracing::info!(ledger = %name, "ledger loaded");
        Ok(ledger)
    }

    fn list(&self) -> DomainResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.ledgers_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> DomainResult<()> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(DomainError::NotFound(format!("ledger `{}`", name)));
        }
        fs::remove_file(&path)?;
        tracing::info!(ledger = %name, "ledger deleted");
        Ok(())
    }
}

pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> DomainResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> DomainResult<Ledger> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    if ledger.schema_version > Ledger::schema_version_default() {
        return Err(DomainError::InvalidArgument(format!(
            "ledger `{}` is from a newer schema version",
            path.display()
        )));
    }
    Ok(ledger)
}

fn default_root() -> PathBuf {
    if let Some(custom) = env::var_os("FINANCE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn ensure_dir(path: &Path) -> DomainResult<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> DomainResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
