//! Report from a sync run.

use serde::{Deserialize, Serialize};

/// Outcome of one reconciliation run (or dry run).
///
/// `actions` holds one human-readable line per change; skips are counted but
/// not listed, so a large unchanged set stays quiet. `errors` holds one line
/// per failed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether every record that needed a write got one
    pub success: bool,
    /// Records created (or that a dry run would create)
    pub created: usize,
    /// Records updated (or that a dry run would update)
    pub updated: usize,
    /// Records whose payload matched the stored fingerprint
    pub skipped: usize,
    /// Records whose write failed
    pub failed: usize,
    /// Actions taken during the run
    pub actions: Vec<String>,
    /// Errors encountered during the run
    pub errors: Vec<String>,
}

impl SyncReport {
    /// An empty, successful report.
    pub fn new() -> Self {
        Self {
            success: true,
            created: 0,
            updated: 0,
            skipped: 0,
            failed: 0,
            actions: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Count a create and record its action line.
    pub fn record_created(&mut self, action: String) {
        self.created += 1;
        self.actions.push(action);
    }

    /// Count an update and record its action line.
    pub fn record_updated(&mut self, action: String) {
        self.updated += 1;
        self.actions.push(action);
    }

    /// Count a skip.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Count a failure and record its error line.
    pub fn record_failed(&mut self, error: String) {
        self.failed += 1;
        self.errors.push(error);
        self.success = false;
    }

    /// Number of records that need (or needed) a write.
    pub fn pending(&self) -> usize {
        self.created + self.updated + self.failed
    }

    /// Whether the run changed nothing and failed nothing.
    pub fn is_noop(&self) -> bool {
        self.pending() == 0
    }
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::new()
    }
}
