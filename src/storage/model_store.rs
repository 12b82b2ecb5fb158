//! Key/value store for serialized classifiers.
//!
//! Keys are derived from instrument symbols; values are opaque bytes. Entries
//! never expire and are never versioned: a stored model is reused until it is
//! deleted by hand.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{Error, Result};

pub trait ModelStore: Send + Sync {
    fn exists(&self, key: &str) -> bool;

    fn load(&self, key: &str) -> Result<Vec<u8>>;

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// Store key for an instrument: `BTC/USDT` -> `BTC_USDT`.
pub fn model_key(symbol: &str) -> String {
    symbol.replace('/', "_")
}

/// One file per model: `<dir>/<key>_model.json`.
#[derive(Debug, Clone)]
pub struct FileModelStore {
    dir: PathBuf,
}

impl FileModelStore {
    /// Open the store, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}_model.json", key))
    }
}

impl ModelStore for FileModelStore {
    fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    fn load(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key);
        fs::read(&path)
            .map_err(|e| Error::Store(format!("failed to read {}: {}", path.display(), e)))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, bytes)
            .map_err(|e| Error::Store(format!("failed to write {}: {}", path.display(), e)))
    }
}

/// In-process store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryModelStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ModelStore for MemoryModelStore {
    fn exists(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|e| e.contains_key(key))
            .unwrap_or(false)
    }

    fn load(&self, key: &str) -> Result<Vec<u8>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::Store("model store lock poisoned".to_string()))?;
        entries
            .get(key)
            .cloned()
            .ok_or_else(|| Error::Store(format!("no model stored under '{}'", key)))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Store("model store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
