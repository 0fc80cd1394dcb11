//! SyncEngine implementation
//!
//! The SyncEngine walks the declared records in order and reconciles each one
//! against the remote store: resolve identity, resolve taxonomy, fingerprint
//! the payload, then create, update, or skip. One record fully completes
//! before the next starts, and a failed record never stops the batch.

use press_remote::{EntityPayload, RemoteClient, RemoteError, TaxonomyKind, WriteReceipt};

use crate::audit::AuditLog;
use crate::fingerprint::fingerprint;
use crate::record::ContentRecord;
use crate::resolver::{IdentityResolver, TaxonomyResolver};
use crate::state::StateStore;
use crate::Result;

use super::report::SyncReport;

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, decide without writing: no create/update is issued, no term
    /// is provisioned, and the state file is untouched. Actions are prefixed
    /// with "[dry-run] Would ..."
    pub dry_run: bool,
}

/// Engine for reconciling declared records into the remote store
///
/// Constructed once per run. Construction prefetches everything the run
/// needs to resolve identity without further reads: the full entity index
/// and both taxonomy caches.
pub struct SyncEngine<'a> {
    client: &'a RemoteClient,
    identity: IdentityResolver,
    categories: TaxonomyResolver,
    tags: TaxonomyResolver,
    state: StateStore,
    audit: AuditLog,
}

impl<'a> SyncEngine<'a> {
    /// Create an engine and prefetch its resolution indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote store cannot be listed; reconciling
    /// against a partial index would re-create entities as duplicates, so an
    /// unreachable store aborts the run before any write.
    pub async fn new(client: &'a RemoteClient, state: StateStore, audit: AuditLog) -> Result<Self> {
        let identity = IdentityResolver::prime(client).await?;
        let mut categories = TaxonomyResolver::new(TaxonomyKind::Category);
        categories.prime(client).await?;
        let mut tags = TaxonomyResolver::new(TaxonomyKind::Tag);
        tags.prime(client).await?;

        Ok(Self {
            client,
            identity,
            categories,
            tags,
            state,
            audit,
        })
    }

    /// Reconcile all records, in declaration order.
    ///
    /// Later records observe identity and taxonomy resolutions created by
    /// earlier records in the same run.
    pub async fn sync(&mut self, records: &[ContentRecord], options: &SyncOptions) -> SyncReport {
        let mut report = SyncReport::new();
        for record in records {
            self.sync_record(record, options, &mut report).await;
        }
        report
    }

    /// Reconcile one record. All failure handling is internal: a failed
    /// write is logged and counted, and the caller moves on.
    async fn sync_record(
        &mut self,
        record: &ContentRecord,
        options: &SyncOptions,
        report: &mut SyncReport,
    ) {
        let resolved = self.identity.resolve(record);
        let payload = self.build_payload(record, options.dry_run).await;

        let current = match fingerprint(&payload) {
            Ok(fp) => fp,
            Err(e) => {
                self.audit.error(&record.title, "n/a", &e.to_string());
                report.record_failed(format!("{}: {e}", record.title));
                return;
            }
        };

        match resolved {
            Some(id) if self.state.fingerprint(id) == Some(current.as_str()) => {
                tracing::debug!(title = %record.title, id, "payload unchanged, skipping");
                report.record_skipped();
            }
            Some(id) => {
                if options.dry_run {
                    report.record_updated(format!(
                        "[dry-run] Would update {} (ID: {id})",
                        record.title
                    ));
                    return;
                }
                tracing::info!(title = %record.title, id, "updating");
                match self.client.update_entity(id, &payload).await {
                    Ok(receipt) => self.finish_write("Updated", record, &receipt, current, report),
                    Err(e) => self.record_failure(record, &e, report),
                }
            }
            None => {
                if options.dry_run {
                    report.record_created(format!("[dry-run] Would create {}", record.title));
                    return;
                }
                tracing::info!(title = %record.title, "creating");
                match self.client.create_entity(&payload).await {
                    Ok(receipt) => {
                        // Later records in this run can now resolve the new
                        // entity by title.
                        self.identity.insert(&record.title, receipt.id);
                        self.finish_write("Created", record, &receipt, current, report);
                    }
                    Err(e) => self.record_failure(record, &e, report),
                }
            }
        }
    }

    /// Assemble the exact payload to transmit, resolving term names to IDs.
    ///
    /// Unresolvable terms are omitted (the resolver has already warned).
    /// Term IDs are sorted and deduplicated so the fingerprint depends on
    /// the resolved set, not on declaration order.
    async fn build_payload(&mut self, record: &ContentRecord, dry_run: bool) -> EntityPayload {
        let client = self.client;

        let mut categories = Vec::new();
        for name in &record.categories {
            let id = if dry_run {
                self.categories.resolve_cached(name)
            } else {
                self.categories.resolve(client, name).await
            };
            if let Some(id) = id {
                categories.push(id);
            }
        }
        categories.sort_unstable();
        categories.dedup();

        let mut tags = Vec::new();
        for name in &record.tags {
            let id = if dry_run {
                self.tags.resolve_cached(name)
            } else {
                self.tags.resolve(client, name).await
            };
            if let Some(id) = id {
                tags.push(id);
            }
        }
        tags.sort_unstable();
        tags.dedup();

        EntityPayload {
            title: record.title.clone(),
            content: record.body.clone(),
            status: record.status.as_wire().to_string(),
            categories,
            tags,
            meta: record.meta.clone(),
        }
    }

    /// Book-keeping after a successful write: flush state, audit, report.
    fn finish_write(
        &mut self,
        action: &str,
        record: &ContentRecord,
        receipt: &WriteReceipt,
        fingerprint: String,
        report: &mut SyncReport,
    ) {
        // A state flush that fails only costs one redundant update on the
        // next run; the remote write already happened, so keep going.
        if let Err(e) = self.state.record(receipt.id, fingerprint) {
            tracing::warn!(id = receipt.id, error = %e, "could not persist sync state");
        }

        self.audit
            .change(action, &record.title, receipt.id, record.status.as_wire());

        let line = if receipt.link.is_empty() {
            format!("{action} {} (ID: {})", record.title, receipt.id)
        } else {
            format!("{action} {} (ID: {}) -> {}", record.title, receipt.id, receipt.link)
        };
        match action {
            "Created" => report.record_created(line),
            _ => report.record_updated(line),
        }
    }

    /// Book-keeping after a failed write: error log, error line, continue.
    fn record_failure(&self, record: &ContentRecord, error: &RemoteError, report: &mut SyncReport) {
        let status = error
            .status()
            .map_or_else(|| "n/a".to_string(), |s| s.to_string());
        self.audit.error(&record.title, &status, &error.to_string());
        report.record_failed(format!("{}: {error}", record.title));
    }
}
