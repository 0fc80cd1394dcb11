//! Persisted sync state.
//!
//! The state file maps remote entity IDs (as strings) to the fingerprint of
//! the payload last written for that entity. It is read once at run start and
//! flushed after every successful write, never batched, so an interrupted run
//! loses at most the in-flight record's entry.

use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use crate::Result;

/// Remote-ID → fingerprint map backed by a JSON file.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl StateStore {
    /// Load the state file, tolerating absence and corruption.
    ///
    /// A missing or unreadable file yields an empty map rather than an
    /// error: on a first run there is nothing to load, and after corruption
    /// the worst outcome of an empty map is one redundant update per entity.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "state file unreadable, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    /// The fingerprint last written for `remote_id`, if any.
    pub fn fingerprint(&self, remote_id: u64) -> Option<&str> {
        self.entries.get(&remote_id.to_string()).map(String::as_str)
    }

    /// Record a successful write and flush to disk immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn record(&mut self, remote_id: u64, fingerprint: String) -> Result<()> {
        self.entries.insert(remote_id.to_string(), fingerprint);
        self.save()
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any entity has been tracked yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save the map atomically with an exclusive lock.
    ///
    /// Write-to-temp-then-rename, with the lock held on the target so two
    /// concurrent invocations cannot interleave their writes.
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.entries)?;

        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        lock_file.lock_exclusive()?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        // Lock released when lock_file is dropped
        Ok(())
    }
}
