//! Append-only audit logs.
//!
//! Two channels: a change log for successful writes (and system-level
//! entries: code updates, rollbacks) and an error log for failed writes.
//! Logging is best-effort; a log line that cannot be appended is a warning,
//! never a reason to fail the run that produced it.

use chrono::Local;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Change log file name inside the working directory.
pub const CHANGE_LOG: &str = "changelog.txt";

/// Error log file name inside the working directory.
pub const ERROR_LOG: &str = "errorlog.txt";

/// Appender for the two audit channels.
#[derive(Debug, Clone)]
pub struct AuditLog {
    change_path: PathBuf,
    error_path: PathBuf,
}

impl AuditLog {
    /// Audit logs rooted in the given working directory.
    pub fn new(work_dir: &Path) -> Self {
        Self {
            change_path: work_dir.join(CHANGE_LOG),
            error_path: work_dir.join(ERROR_LOG),
        }
    }

    /// Log a successful write: `[ts] [CREATED (DRAFT)] Title (ID: 942)`.
    pub fn change(&self, action: &str, title: &str, id: impl Display, status: &str) {
        let entry = format!(
            "[{}] [{} ({})] {} (ID: {})\n",
            timestamp(),
            action.to_uppercase(),
            status.to_uppercase(),
            title,
            id
        );
        self.append(&self.change_path, &entry);
    }

    /// Log a failed write: `[ts] [ERROR] Title - Status: 500 - Message: ...`.
    pub fn error(&self, title: &str, status: impl Display, message: &str) {
        let entry = format!(
            "[{}] [ERROR] {} - Status: {} - Message: {}\n",
            timestamp(),
            title,
            status,
            message
        );
        self.append(&self.error_path, &entry);
    }

    /// Log a rollback on the change channel.
    pub fn rollback(&self, message: &str) {
        let entry = format!("[{}] [ROLLBACK] {}\n", timestamp(), message);
        self.append(&self.change_path, &entry);
    }

    /// Log an integrity difference on the change channel, under the distinct
    /// `CODE UPDATE` action so content changes and tool changes stay
    /// separable in the same trail.
    pub fn code_update(&self, files: &[String]) {
        self.change("CODE UPDATE", &format!("Modified files: {}", files.join(", ")), "SYSTEM", "n/a");
    }

    fn append(&self, path: &Path, entry: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut f| f.write_all(entry.as_bytes()));
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "could not append audit entry");
        }
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
