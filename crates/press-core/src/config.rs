//! Configuration for a publishing project.
//!
//! A project root holds `press.toml` (site credentials and routes), the
//! content document it points at, and a `.press/` working directory for
//! everything the tool owns: state, integrity record, audit logs, backups.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file name at the project root.
pub const CONFIG_FILE: &str = "press.toml";

/// Working directory for tool-owned files.
pub const WORK_DIR: &str = ".press";

/// Environment variable that overrides `[site].app_password`.
pub const PASSWORD_ENV: &str = "PRESS_APP_PASSWORD";

fn default_source() -> String {
    "content.toml".to_string()
}

fn default_entity_route() -> String {
    "posts".to_string()
}

fn default_tracked() -> Vec<String> {
    vec!["content.toml".to_string(), CONFIG_FILE.to_string()]
}

/// Remote store coordinates and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
    /// Store root, e.g. `https://example.com`.
    pub base_url: String,
    pub username: String,
    /// Application password; prefer the environment variable for anything
    /// that gets committed.
    #[serde(default)]
    pub app_password: Option<String>,
}

/// Where the declared content lives, locally and remotely.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentSection {
    /// Content document path, relative to the project root.
    #[serde(default = "default_source")]
    pub source: String,
    /// Content collection route under the store's API root.
    #[serde(default = "default_entity_route")]
    pub entity_route: String,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            entity_route: default_entity_route(),
        }
    }
}

/// Files watched by the integrity monitor.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegritySection {
    /// Paths relative to the project root.
    #[serde(default = "default_tracked")]
    pub tracked: Vec<String>,
}

impl Default for IntegritySection {
    fn default() -> Self {
        Self {
            tracked: default_tracked(),
        }
    }
}

/// Parsed `press.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PressConfig {
    pub site: SiteSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub integrity: IntegritySection,
}

impl PressConfig {
    /// Parse a configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or is missing the
    /// `[site]` section.
    pub fn parse(content: &str) -> Result<Self> {
        let config: PressConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the configuration for the project rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if `press.toml` is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Err(Error::ConfigNotFound { path });
        }
        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// Resolve the credential: environment variable first, then the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if neither source provides one.
    pub fn app_password(&self) -> Result<String> {
        if let Ok(password) = std::env::var(PASSWORD_ENV)
            && !password.is_empty()
        {
            return Ok(password);
        }
        self.site
            .app_password
            .clone()
            .ok_or(Error::MissingCredential { env: PASSWORD_ENV })
    }

    /// Absolute path of the content document.
    pub fn content_path(&self, root: &Path) -> PathBuf {
        root.join(&self.content.source)
    }

    /// Absolute path of the working directory.
    pub fn work_dir(&self, root: &Path) -> PathBuf {
        root.join(WORK_DIR)
    }

    /// Absolute paths of the integrity-tracked files.
    pub fn tracked_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.integrity.tracked.iter().map(|f| root.join(f)).collect()
    }
}
