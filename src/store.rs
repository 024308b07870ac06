//! Persistent key-value store backed by one JSON file per key.
//!
//! This is the only layer that touches the filesystem for tracked data. Keys
//! map to `<data_dir>/<key>.json`; values are whole serialized collections.
//! Writes go through a temporary file and an atomic rename so a crash mid-write
//! never leaves a half-written collection behind.

use std::{fs, io::Write, path::PathBuf};

use log::{debug, error, info, trace, warn};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::{MmError, Result};

/// Store key holding the current session's user record.
pub const SESSION_KEY: &str = "mindmate_user";

/// Store key for a user's mood entry collection.
pub fn mood_entries_key(user_id: &str) -> String {
    format!("mindmate_mood_entries_{}", user_id)
}

/// Store key for a user's journal entry collection.
pub fn journal_entries_key(user_id: &str) -> String {
    format!("mindmate_journal_entries_{}", user_id)
}

/// Store key for a user's habit collection.
pub fn habits_key(user_id: &str) -> String {
    format!("mindmate_habits_{}", user_id)
}

/// File-per-key JSON store rooted at the configured data directory.
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens the store, creating the root directory if needed.
    pub fn open(root: PathBuf) -> Result<Self> {
        if !root.exists() {
            debug!("Data directory does not exist, creating: {}", root.display());
            fs::create_dir_all(&root).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                MmError::DirectoryError { path: root.clone() }
            })?;
        }
        Ok(JsonStore { root })
    }

    /// Helper method to get the file path for a key
    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Reads and deserializes the value stored under `key`.
    ///
    /// A missing file is an ordinary absence. A malformed file is logged and
    /// also reported as absent, so corrupted state degrades to the seed/empty
    /// path instead of failing the operation.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        if !path.exists() {
            trace!("Store key absent: {}", key);
            return None;
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to read store file {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                trace!("Loaded store key: {}", key);
                Some(value)
            }
            Err(e) => {
                warn!(
                    "Malformed JSON under key {} ({}); treating as absent",
                    key, e
                );
                None
            }
        }
    }

    /// Serializes and writes `value` under `key` using an atomic replace.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key);
        debug!("Writing store key {} to {}", key, path.display());

        // Create a temporary file in the same directory (for atomic operation)
        let mut temp_file = NamedTempFile::new_in(&self.root).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            MmError::Io(e)
        })?;

        let json = serde_json::to_string_pretty(value).map_err(|e| {
            error!("Failed to serialize value for key {}: {}", key, e);
            MmError::Serialization(e)
        })?;

        temp_file.write_all(json.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            MmError::Io(e)
        })?;

        temp_file.flush().map_err(|e| {
            error!("Failed to flush temporary file: {}", e);
            MmError::Io(e)
        })?;

        // Atomically move the temporary file to the target location
        temp_file.persist(&path).map_err(|e| {
            error!("Failed to persist file {}: {}", path.display(), e.error);
            MmError::Io(e.error)
        })?;

        trace!("Store key written: {}", key);
        Ok(())
    }

    /// Removes the value stored under `key`, if present.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                error!("Failed to remove store file {}: {}", path.display(), e);
                MmError::Io(e)
            })?;
            info!("Removed store key: {}", key);
        }
        Ok(())
    }

    /// Returns true when a value exists under `key`.
    pub fn exists(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }
}
