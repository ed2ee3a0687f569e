//! Best-score persistence
//!
//! A single scalar survives between sessions. Stores never fail loudly: a
//! missing or unreadable record reads as 0, a failed write is logged and the
//! game carries on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the underlying storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt best-score record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}

/// On-disk / LocalStorage record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best_score: u32,
}

/// Where the best score lives between sessions
pub trait ScoreStore {
    /// Persisted best, 0 if absent or unreadable
    fn load_best_score(&self) -> u32;
    /// Persist a new best
    fn save_best_score(&mut self, best: u32);
}

/// In-process store (tests, demos)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u32,
    /// Number of writes, for asserting persistence happens once per new best
    pub writes: u32,
}

impl MemoryStore {
    pub fn with_best(best: u32) -> Self {
        Self { best, writes: 0 }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&self) -> u32 {
        self.best
    }

    fn save_best_score(&mut self, best: u32) {
        self.best = best;
        self.writes += 1;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{BestScoreRecord, ScoreStore, StoreError};

    /// JSON file next to the binary (or wherever the caller points it)
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Read the record; a missing file is a zero best, not an error
        pub fn try_load(&self) -> Result<u32, StoreError> {
            match std::fs::read_to_string(&self.path) {
                Ok(json) => Ok(serde_json::from_str::<BestScoreRecord>(&json)?.best_score),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
                Err(e) => Err(e.into()),
            }
        }

        /// Write through a temp file so a crash mid-write can't corrupt the record
        pub fn try_save(&self, best: u32) -> Result<(), StoreError> {
            let json = serde_json::to_string_pretty(&BestScoreRecord { best_score: best })?;
            let tmp = self.path.with_extension("tmp");
            std::fs::write(&tmp, json)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl ScoreStore for FileStore {
        fn load_best_score(&self) -> u32 {
            match self.try_load() {
                Ok(best) => {
                    log::info!("Loaded best score {} from {}", best, self.path.display());
                    best
                }
                Err(e) => {
                    log::warn!("Could not read {}: {} - starting from 0", self.path.display(), e);
                    0
                }
            }
        }

        fn save_best_score(&mut self, best: u32) {
            match self.try_save(best) {
                Ok(()) => log::info!("Best score {} saved", best),
                Err(e) => log::warn!("Could not save best score: {}", e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::{BestScoreRecord, ScoreStore, StoreError};

    /// Browser LocalStorage
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        const STORAGE_KEY: &'static str = "skyhop_best_score";

        fn storage() -> Result<web_sys::Storage, StoreError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StoreError::Unavailable)
        }

        pub fn try_load(&self) -> Result<u32, StoreError> {
            let storage = Self::storage()?;
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => Ok(serde_json::from_str::<BestScoreRecord>(&json)?.best_score),
                Ok(None) => Ok(0),
                Err(_) => Err(StoreError::Unavailable),
            }
        }

        pub fn try_save(&self, best: u32) -> Result<(), StoreError> {
            let storage = Self::storage()?;
            let json = serde_json::to_string(&BestScoreRecord { best_score: best })?;
            storage
                .set_item(Self::STORAGE_KEY, &json)
                .map_err(|_| StoreError::Unavailable)
        }
    }

    impl ScoreStore for LocalStorageStore {
        fn load_best_score(&self) -> u32 {
            self.try_load().unwrap_or_else(|e| {
                log::warn!("Best score unavailable: {} - starting from 0", e);
                0
            })
        }

        fn save_best_score(&mut self, best: u32) {
            match self.try_save(best) {
                Ok(()) => log::info!("Best score {} saved", best),
                Err(e) => log::warn!("Could not save best score: {}", e),
            }
        }
    }
}
