//! Error types for press-core

use std::path::PathBuf;

/// Result type for press-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in press-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// No credential configured for the remote store
    #[error("No app password configured: set [site].app_password or the {env} environment variable")]
    MissingCredential { env: &'static str },

    /// Content document could not be read
    #[error("Content document not found at {path}")]
    ContentNotFound { path: PathBuf },

    /// Rollback target is not a known component
    #[error("Unknown component: {name} (expected \"content\" or \"config\")")]
    UnknownComponent { name: String },

    /// No snapshot holds a copy of the requested component
    #[error("No backup found for {component}")]
    NoBackup { component: String },

    /// Error in backup or restore operations
    #[error("Backup error: {message}")]
    BackupError { message: String },

    // Transparent wrappers for underlying crate errors
    /// Remote store error from press-remote
    #[error(transparent)]
    Remote(#[from] press_remote::RemoteError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
