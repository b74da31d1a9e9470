//! JSON file backend (native)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BestScoreStore, StorageError, encode_record, parse_record};

#[derive(Debug, Clone)]
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

    /// Stored best; a missing file is not an error
    pub fn try_load(&self) -> Result<u64, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_record(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Write via a temp file then rename, so a crash never leaves half a record
    pub fn try_save(&self, best: u64) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encode_record(best)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best(&self) -> u64 {
        match self.try_load() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Ignoring best score at {}: {e}", self.path.display());
                0
            }
        }
    }

    fn save_best(&mut self, best: u64) {
        match self.try_save(best) {
            Ok(()) => log::info!("Best score {best} saved to {}", self.path.display()),
            Err(e) => log::warn!("Could not save best score: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tap-frenzy-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("best.json")
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = JsonFileStore::new(scratch("missing"));
        assert_eq!(store.try_load().unwrap(), 0);
        assert_eq!(store.load_best(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("roundtrip");
        let mut store = JsonFileStore::new(&path);
        store.save_best(390);
        assert_eq!(JsonFileStore::new(&path).load_best(), 390);
        assert!(!path.with_extension("tmp").exists());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_degrades_to_zero() {
        let path = scratch("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ best: ").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.try_load().is_err());
        assert_eq!(store.load_best(), 0);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
