//! Project context shared by all commands.
//!
//! Resolves the project root's configuration once and derives every path the
//! commands need from it.

use std::path::{Path, PathBuf};

use press_core::{AuditLog, PressConfig, CONFIG_FILE};
use press_remote::RemoteClient;

use crate::error::Result;

/// A loaded publishing project.
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: PressConfig,
}

impl ProjectContext {
    /// Load the project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let config = PressConfig::load(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// The tool-owned working directory.
    pub fn work_dir(&self) -> PathBuf {
        self.config.work_dir(&self.root)
    }

    /// Sync state file path.
    pub fn state_path(&self) -> PathBuf {
        self.work_dir().join("state.json")
    }

    /// Integrity record file path.
    pub fn integrity_path(&self) -> PathBuf {
        self.work_dir().join("integrity.json")
    }

    /// Backup root directory.
    pub fn backups_dir(&self) -> PathBuf {
        self.work_dir().join("backups")
    }

    /// The declared content document.
    pub fn content_path(&self) -> PathBuf {
        self.config.content_path(&self.root)
    }

    /// The configuration file itself.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Audit logs rooted in the working directory.
    pub fn audit(&self) -> AuditLog {
        AuditLog::new(&self.work_dir())
    }

    /// Build the remote client from the configured site.
    pub fn client(&self) -> Result<RemoteClient> {
        let password = self.config.app_password()?;
        Ok(RemoteClient::new(
            &self.config.site.base_url,
            &self.config.content.entity_route,
            &self.config.site.username,
            &password,
        )?)
    }
}
