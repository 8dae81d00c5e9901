//! Persistence port for match saves, with a JSON file and an in-memory implementation.

use crate::models::{MatchError, MatchId, SavedMatch};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Errors from saving or loading matches.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// No save with this id.
    NotFound(MatchId),
    /// The save exists but does not describe a valid match.
    Match(MatchError),
    /// A shared store's lock was poisoned by a panicking writer.
    Lock,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Storage error: {}", e),
            StoreError::Json(e) => write!(f, "Corrupt save file: {}", e),
            StoreError::NotFound(id) => write!(f, "No saved match {}", id),
            StoreError::Match(e) => write!(f, "{}", e),
            StoreError::Lock => write!(f, "Save store lock error"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

impl From<MatchError> for StoreError {
    fn from(e: MatchError) -> Self {
        StoreError::Match(e)
    }
}

/// Where match saves live. Passed to whoever needs to save; never global.
pub trait MatchStore {
    /// Save a match, replacing any earlier save with the same id.
    fn save(&mut self, record: SavedMatch) -> Result<(), StoreError>;

    fn load_all(&self) -> Result<Vec<SavedMatch>, StoreError>;

    fn delete(&mut self, id: MatchId) -> Result<(), StoreError>;

    fn load(&self, id: MatchId) -> Result<SavedMatch, StoreError> {
        self.load_all()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

/// Keeps saves in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub records: Vec<SavedMatch>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryStore {
    fn save(&mut self, record: SavedMatch) -> Result<(), StoreError> {
        upsert(&mut self.records, record);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SavedMatch>, StoreError> {
        Ok(self.records.clone())
    }

    fn delete(&mut self, id: MatchId) -> Result<(), StoreError> {
        remove(&mut self.records, id)
    }
}

/// All saves in one pretty-printed JSON array. A missing file is an empty list.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write next to the file, then rename over it, so readers and crashes
    /// never see a half-written array.
    fn write_all(&self, records: &[SavedMatch]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl MatchStore for JsonFileStore {
    fn save(&mut self, record: SavedMatch) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        log::info!("Saving match {} to {}", record.label(), self.path.display());
        upsert(&mut records, record);
        self.write_all(&records)
    }

    fn load_all(&self) -> Result<Vec<SavedMatch>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self, id: MatchId) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        remove(&mut records, id)?;
        self.write_all(&records)
    }
}

/// One store shared by many sessions. Each call holds the lock for its whole
/// read-modify-write.
impl<S: MatchStore> MatchStore for Arc<Mutex<S>> {
    fn save(&mut self, record: SavedMatch) -> Result<(), StoreError> {
        let mut store = self.lock().map_err(|_| StoreError::Lock)?;
        store.save(record)
    }

    fn load_all(&self) -> Result<Vec<SavedMatch>, StoreError> {
        let store = self.lock().map_err(|_| StoreError::Lock)?;
        store.load_all()
    }

    fn delete(&mut self, id: MatchId) -> Result<(), StoreError> {
        let mut store = self.lock().map_err(|_| StoreError::Lock)?;
        store.delete(id)
    }

    fn load(&self, id: MatchId) -> Result<SavedMatch, StoreError> {
        let store = self.lock().map_err(|_| StoreError::Lock)?;
        store.load(id)
    }
}

fn upsert(records: &mut Vec<SavedMatch>, record: SavedMatch) {
    match records.iter_mut().find(|r| r.id == record.id) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

fn remove(records: &mut Vec<SavedMatch>, id: MatchId) -> Result<(), StoreError> {
    let idx = records
        .iter()
        .position(|r| r.id == id)
        .ok_or(StoreError::NotFound(id))?;
    records.remove(idx);
    Ok(())
}
