//! Integrity monitoring for the tool's own inputs.
//!
//! The engine overwrites production content, so it is worth knowing whether a
//! surprising diff came from edited content or from a changed tool setup. At
//! run start each tracked file is checksummed and compared against the
//! recorded value from the previous run; differences are reported (and
//! audited as `CODE UPDATE` entries by the caller) but never influence
//! create/update/skip decisions.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fingerprint::file_checksum;
use crate::Result;

/// Tracks checksums of the authoritative files across runs.
#[derive(Debug)]
pub struct IntegrityMonitor {
    record_path: PathBuf,
    tracked: Vec<PathBuf>,
}

impl IntegrityMonitor {
    /// Monitor the given files, persisting checksums at `record_path`.
    pub fn new(record_path: impl Into<PathBuf>, tracked: Vec<PathBuf>) -> Self {
        Self {
            record_path: record_path.into(),
            tracked,
        }
    }

    /// Compare tracked files against the stored record and update it.
    ///
    /// Returns the names of files whose checksum differs from the previous
    /// run (on a first run, every tracked file). When anything differs the
    /// record is rewritten. Files that cannot be read are skipped with a
    /// warning and dropped from the record.
    ///
    /// # Errors
    ///
    /// Returns an error only if a changed record cannot be persisted.
    pub fn check(&self) -> Result<Vec<String>> {
        let previous = self.load_record();
        let (current, changed) = self.compare(&previous);

        if current != previous {
            if let Some(parent) = self.record_path.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.record_path, serde_json::to_string_pretty(&current)?)?;
        }

        Ok(changed)
    }

    /// Compare without touching the stored record. Used by read-only
    /// preview commands.
    pub fn peek(&self) -> Vec<String> {
        let previous = self.load_record();
        self.compare(&previous).1
    }

    /// Checksum every tracked file against `previous`.
    fn compare(&self, previous: &BTreeMap<String, String>) -> (BTreeMap<String, String>, Vec<String>) {
        let mut current = BTreeMap::new();
        let mut changed = Vec::new();

        for path in &self.tracked {
            let name = display_name(path);
            match file_checksum(path) {
                Ok(checksum) => {
                    if previous.get(&name) != Some(&checksum) {
                        changed.push(name.clone());
                    }
                    current.insert(name, checksum);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not checksum tracked file");
                }
            }
        }

        (current, changed)
    }

    /// Load the stored record, tolerating absence and corruption the same
    /// way the state store does.
    fn load_record(&self) -> BTreeMap<String, String> {
        match fs::read_to_string(&self.record_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %self.record_path.display(), error = %e, "integrity record unreadable, starting empty");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
