//! Backup snapshots and rollback.
//!
//! Every run snapshots the authoritative files into a timestamped directory
//! under the backup root before touching anything. Snapshots are append-only:
//! a new run creates a new directory, and old ones stay available for
//! rollback. Rollback is never automatic; it is a separate, operator-invoked
//! operation that restores one file's exact bytes from the newest snapshot
//! holding it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Metadata for one snapshot directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// When the snapshot was created
    pub created: DateTime<Utc>,
    /// File names captured in this snapshot
    pub files: Vec<String>,
}

/// One timestamped snapshot on disk
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Directory name under the backup root
    pub label: String,
    /// Path to the snapshot directory
    pub path: PathBuf,
    /// Snapshot metadata
    pub metadata: SnapshotMetadata,
}

impl Snapshot {
    /// Whether this snapshot holds a copy of `file_name`.
    pub fn contains(&self, file_name: &str) -> bool {
        self.metadata.files.iter().any(|f| f == file_name)
    }
}

/// Manages the backup root directory
pub struct BackupManager {
    backups_dir: PathBuf,
}

impl BackupManager {
    /// Create a manager for the given backup root.
    pub fn new(backups_dir: impl Into<PathBuf>) -> Self {
        Self {
            backups_dir: backups_dir.into(),
        }
    }

    /// Snapshot the given files into a fresh timestamped directory.
    ///
    /// A file that cannot be copied (missing, unreadable) is logged as a
    /// warning and left out of the snapshot; the remaining files are still
    /// captured. The snapshot directory is created even when every copy
    /// fails, so the audit trail records that a run started.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot directory or its metadata cannot be
    /// written.
    pub fn snapshot(&self, files: &[PathBuf]) -> Result<Snapshot> {
        let created = Utc::now();
        let label = self.next_label(&created);
        let snapshot_dir = self.backups_dir.join(&label);
        fs::create_dir_all(&snapshot_dir)?;

        let mut captured = Vec::new();
        for file in files {
            let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(path = %file.display(), "skipping backup of unnameable path");
                continue;
            };
            match fs::copy(file, snapshot_dir.join(name)) {
                Ok(_) => captured.push(name.to_string()),
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "backup failed for file");
                }
            }
        }

        let metadata = SnapshotMetadata {
            created,
            files: captured,
        };
        fs::write(
            snapshot_dir.join("metadata.toml"),
            toml::to_string_pretty(&metadata)?,
        )?;

        Ok(Snapshot {
            label,
            path: snapshot_dir,
            metadata,
        })
    }

    /// List all snapshots, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup root cannot be read.
    pub fn list(&self) -> Result<Vec<Snapshot>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }

        let mut snapshots = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir()
                && let Some(label) = path.file_name().and_then(|n| n.to_str())
                && let Some(snapshot) = self.read_snapshot(label)?
            {
                snapshots.push(snapshot);
            }
        }

        snapshots.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(snapshots)
    }

    /// The newest snapshot holding a copy of `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup root cannot be read.
    pub fn latest_with(&self, file_name: &str) -> Result<Option<Snapshot>> {
        Ok(self
            .list()?
            .into_iter()
            .rev()
            .find(|s| s.contains(file_name)))
    }

    /// Restore `file_name` from `snapshot` over `live_path`.
    ///
    /// The restore is atomic: bytes are written to a temporary file next to
    /// the target and renamed into place, so a failure mid-way never leaves a
    /// half-written live file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoBackup`] if the snapshot does not hold the file,
    /// or an I/O error if the restore itself fails.
    pub fn restore(&self, snapshot: &Snapshot, file_name: &str, live_path: &Path) -> Result<()> {
        let source = snapshot.path.join(file_name);
        if !snapshot.contains(file_name) || !source.exists() {
            return Err(Error::NoBackup {
                component: file_name.to_string(),
            });
        }

        let bytes = fs::read(&source)?;

        if let Some(parent) = live_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let temp_path = live_path.with_extension("restore.tmp");
        fs::write(&temp_path, &bytes)?;
        fs::rename(&temp_path, live_path)?;

        Ok(())
    }

    /// Read one snapshot directory's metadata.
    fn read_snapshot(&self, label: &str) -> Result<Option<Snapshot>> {
        let path = self.backups_dir.join(label);
        let metadata_path = path.join("metadata.toml");
        if !metadata_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&metadata_path)?;
        let metadata: SnapshotMetadata = toml::from_str(&content)?;
        Ok(Some(Snapshot {
            label: label.to_string(),
            path,
            metadata,
        }))
    }

    /// Timestamped directory name, suffixed when two runs share a second.
    fn next_label(&self, created: &DateTime<Utc>) -> String {
        let base = created.format("%Y%m%dT%H%M%SZ").to_string();
        if !self.backups_dir.join(&base).exists() {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.backups_dir.join(&candidate).exists() {
                return candidate;
            }
            n += 1;
        }
    }
}
