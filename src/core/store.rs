//! # Local Store
//!
//! File-per-entity JSON cache. A store is rooted at one directory and maps
//! `key` to `<dir>/<key>.json`, with the key used verbatim as the file stem.
//!
//! Two write modes:
//! - `write` / `cache_populate`: skip if the file already exists, so a cached
//!   snapshot is never replaced behind the user's back.
//! - `user_save`: always overwrites with the snapshot being saved.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// File stem of the all-countries cache.
pub const ALL_COUNTRIES_KEY: &str = "allCountries";

#[derive(Debug)]
pub enum StoreError {
    /// No file for this key.
    NotFound(String),
    /// Key cannot be used as a file stem (empty, `..`, path separators, NUL).
    InvalidKey(String),
    /// File exists but does not decode into the requested entity.
    Corrupt { key: String, message: String },
    Io(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(key) => write!(f, "nothing stored for '{key}'"),
            StoreError::InvalidKey(key) => write!(f, "invalid store key '{key}'"),
            StoreError::Corrupt { key, message } => {
                write!(f, "stored '{key}' is unreadable: {message}")
            }
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Result of a skip-if-exists write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Skipped,
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("Local store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).map(|p| p.exists()).unwrap_or(false)
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let path = self.path_for(key)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&json).map_err(|e| {
            warn!("Corrupt store entry {}: {}", path.display(), e);
            StoreError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Writes `value` unless a file for `key` already exists.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<WriteOutcome, StoreError> {
        let path = self.path_for(key)?;
        if path.exists() {
            debug!("{} already exists, skipping write", path.display());
            return Ok(WriteOutcome::Skipped);
        }
        atomic_write_json(&path, value)?;
        debug!("Wrote {}", path.display());
        Ok(WriteOutcome::Written)
    }

    /// Populates the cache for `key`. Same skip-if-exists contract as `write`.
    pub fn cache_populate<T: Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<WriteOutcome, StoreError> {
        self.write(key, value)
    }

    /// Stores `value` for `key`, replacing whatever was there.
    pub fn user_save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        atomic_write_json(&path, value)?;
        debug!("Saved {}", path.display());
        Ok(())
    }

    /// Removes the file for `key`. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let unsafe_char = key.contains(['/', '\\', '\0']);
    if key.is_empty() || key == "." || key == ".." || unsafe_char {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
