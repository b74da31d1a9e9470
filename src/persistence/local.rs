//! Browser LocalStorage backend (wasm)

use super::{BestScoreStore, StorageError, encode_record, parse_record};

/// The window's LocalStorage, if the browser allows it
pub(crate) fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or_else(|| StorageError::Unavailable("LocalStorage".into()))
}

#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "tap_frenzy_best_score_v1";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn try_load(&self) -> Result<u64, StorageError> {
        let storage = local_storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(raw)) => parse_record(&raw),
            Ok(None) => Ok(0),
            Err(_) => Err(StorageError::Unavailable("LocalStorage read".into())),
        }
    }

    pub fn try_save(&self, best: u64) -> Result<(), StorageError> {
        let storage = local_storage()?;
        storage
            .set_item(&self.key, &encode_record(best)?)
            .map_err(|_| StorageError::Unavailable("LocalStorage write".into()))
    }
}

impl BestScoreStore for LocalStorageStore {
    fn load_best(&self) -> u64 {
        self.try_load().unwrap_or_else(|e| {
            log::warn!("No best score loaded: {e}");
            0
        })
    }

    fn save_best(&mut self, best: u64) {
        match self.try_save(best) {
            Ok(()) => log::info!("Best score {best} saved"),
            Err(e) => log::warn!("Could not save best score: {e}"),
        }
    }
}
