//! Best score persistence
//!
//! A single scalar survives between sessions. Backends:
//! - `MemoryStore`: in-process, for tests and embedding
//! - `JsonFileStore`: native, JSON file with tmp-then-rename writes
//! - `LocalStorageStore`: wasm, browser LocalStorage

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage backend failures. Never surfaced to gameplay.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// On-disk / in-storage record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRecord {
    pub best: u64,
}

/// Read/write access to the persisted best score
///
/// Failures degrade to "no best yet" on load and are dropped on save.
pub trait BestScoreStore {
    fn load_best(&self) -> u64;
    fn save_best(&mut self, best: u64);
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for Box<T> {
    fn load_best(&self) -> u64 {
        (**self).load_best()
    }

    fn save_best(&mut self, best: u64) {
        (**self).save_best(best);
    }
}

/// In-memory store; counts writes so callers can verify save policy
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: Option<u64>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_best(best: u64) -> Self {
        Self {
            best: Some(best),
            writes: 0,
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best(&self) -> u64 {
        self.best.unwrap_or(0)
    }

    fn save_best(&mut self, best: u64) {
        self.best = Some(best);
        self.writes += 1;
    }
}

/// Parse a stored record, accepting a bare integer as written by older builds
pub fn parse_record(raw: &str) -> Result<u64, StorageError> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Ok(n);
    }
    let record: BestRecord = serde_json::from_str(raw)?;
    Ok(record.best)
}

pub fn encode_record(best: u64) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&BestRecord { best })?)
}
