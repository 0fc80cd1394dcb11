//! Core reconciliation engine for Content Press
//!
//! Content Press synchronizes a locally declared set of content records into
//! a remote content store. This crate implements:
//!
//! - **Normalization**: one comparison-key rule shared by identity and
//!   taxonomy matching
//! - **Resolvers**: per-run identity index and taxonomy caches with on-demand
//!   term provisioning
//! - **Fingerprinting**: canonical-JSON SHA-256 over the exact transmitted
//!   payload, for change detection
//! - **SyncEngine**: the per-record create/update/skip state machine
//! - **StateStore**: remote-ID → fingerprint map, flushed after every write
//! - **Backup & rollback**: timestamped snapshots of the authoritative files
//! - **IntegrityMonitor**: detects changes to the tool's own inputs
//!
//! # Architecture
//!
//! `press-core` sits between the transport crate and the CLI:
//!
//! ```text
//!        press-cli
//!            |
//!        press-core
//!            |
//!       press-remote
//! ```
//!
//! A run is strictly sequential: backup, integrity check, prefetch, then one
//! record at a time. Each record's remote write completes before the next
//! record starts, and the state file is flushed after every successful write
//! so an interrupted run loses at most the in-flight record.

pub mod audit;
pub mod backup;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod integrity;
pub mod normalize;
pub mod record;
pub mod resolver;
pub mod state;
pub mod sync;

pub use audit::AuditLog;
pub use backup::{BackupManager, Snapshot, SnapshotMetadata};
pub use config::{PressConfig, CONFIG_FILE, WORK_DIR};
pub use error::{Error, Result};
pub use fingerprint::{content_checksum, file_checksum, fingerprint};
pub use integrity::IntegrityMonitor;
pub use normalize::normalize_key;
pub use record::{ContentRecord, ContentSet, ContentStatus};
pub use resolver::{IdentityResolver, TaxonomyResolver};
pub use state::StateStore;
pub use sync::{SyncEngine, SyncOptions, SyncReport};
