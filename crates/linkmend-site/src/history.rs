//! Bounded history stores (the external key-value collaborator).
//!
//! Two implementations of [`BoundedLog`]: an in-memory one for tests and
//! embedding, and a JSON file one with write-to-tmp + rename so a crashed
//! write never leaves a half-written list behind. Reads are forgiving:
//! a missing or malformed backing file is an empty history, never an
//! error.

use linkmend_core::{BoundedLog, Error, ErrorRecord, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryLog<T> {
    items: Mutex<Vec<T>>,
}

impl<T> MemoryLog<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone + Send + Sync> BoundedLog<T> for MemoryLog<T> {
    fn get(&self) -> Result<Vec<T>> {
        let items = self
            .items
            .lock()
            .map_err(|_| Error::History("memory log poisoned".to_string()))?;
        Ok(items.clone())
    }

    fn put(&self, new_items: Vec<T>) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| Error::History("memory log poisoned".to_string()))?;
        *items = new_items;
        Ok(())
    }
}

/// A JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileLog<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileLog<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned + Send + Sync> BoundedLog<T> for JsonFileLog<T> {
    fn get(&self) -> Result<Vec<T>> {
        let Ok(bytes) = fs::read(&self.path) else {
            return Ok(Vec::new());
        };
        // Malformed stored state degrades to empty.
        Ok(serde_json::from_slice(&bytes).unwrap_or_default())
    }

    fn put(&self, items: Vec<T>) -> Result<()> {
        let bytes =
            serde_json::to_vec(&items).map_err(|e| Error::History(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| Error::History(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::History(e.to_string()))
    }
}

/// Record a broken-link event, newest first, keeping at most `cap`.
pub fn record_error(
    log: &dyn BoundedLog<ErrorRecord>,
    record: ErrorRecord,
    cap: usize,
) -> Result<()> {
    log.push_front_bounded(record, cap)
}

/// Remember a search term: case-insensitive dedupe, move to front, cap.
pub fn remember_search(log: &dyn BoundedLog<String>, term: &str, cap: usize) -> Result<()> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(());
    }
    let mut items = log.get()?;
    let lowered = term.to_lowercase();
    items.retain(|t| t.to_lowercase() != lowered);
    items.insert(0, term.to_string());
    items.truncate(cap);
    log.put(items)
}
