//! Per-run identity and taxonomy resolution.
//!
//! Both resolvers are plain structs constructed once per run and passed into
//! the engine, so no resolution state outlives the run that built it. Both
//! match through [`normalize_key`](crate::normalize::normalize_key) and
//! nothing else.

use std::collections::HashMap;

use press_remote::{RemoteClient, TaxonomyKind};

use crate::normalize::normalize_key;
use crate::record::ContentRecord;
use crate::Result;

/// Maps local records to remote entity IDs.
///
/// Built from one full listing of the remote collection, drafts included, so
/// an unpublished remote entity still matches its local record instead of
/// being duplicated.
#[derive(Debug)]
pub struct IdentityResolver {
    index: HashMap<String, u64>,
}

impl IdentityResolver {
    /// Build the index from a full remote listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched; without a complete
    /// index every unmatched record would be re-created as a duplicate.
    pub async fn prime(client: &RemoteClient) -> Result<Self> {
        let entities = client.list_entities().await?;
        let mut index = HashMap::with_capacity(entities.len());
        for entity in entities {
            let key = normalize_key(&entity.title.rendered);
            if !key.is_empty() {
                index.insert(key, entity.id);
            }
        }
        tracing::debug!(entities = index.len(), "identity index primed");
        Ok(Self { index })
    }

    /// Resolve a record to its remote ID, or `None` when it is new.
    ///
    /// An explicit `remote_id` on the record wins outright; otherwise the
    /// normalized title is looked up in the index.
    pub fn resolve(&self, record: &ContentRecord) -> Option<u64> {
        if let Some(id) = record.remote_id {
            return Some(id);
        }
        self.index.get(&normalize_key(&record.title)).copied()
    }

    /// Register a newly created entity so later records in the same run can
    /// resolve against it.
    pub fn insert(&mut self, title: &str, id: u64) {
        let key = normalize_key(title);
        if !key.is_empty() {
            self.index.insert(key, id);
        }
    }

    /// Number of indexed remote entities.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the remote collection was empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Resolves taxonomy term names to remote term IDs, provisioning on miss.
#[derive(Debug)]
pub struct TaxonomyResolver {
    kind: TaxonomyKind,
    cache: HashMap<String, u64>,
    primed: bool,
}

impl TaxonomyResolver {
    /// A cold resolver for one taxonomy kind.
    pub fn new(kind: TaxonomyKind) -> Self {
        Self {
            kind,
            cache: HashMap::new(),
            primed: false,
        }
    }

    /// Fetch the full term listing and build the name cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched. The cache is left
    /// cold, so a later [`resolve`](Self::resolve) will retry the listing
    /// rather than blindly creating duplicate terms.
    pub async fn prime(&mut self, client: &RemoteClient) -> Result<()> {
        let terms = client.list_terms(self.kind).await?;
        for term in &terms {
            let key = normalize_key(&term.name);
            if !key.is_empty() {
                self.cache.insert(key, term.id);
            }
        }
        self.primed = true;
        tracing::debug!(kind = self.kind.label(), terms = self.cache.len(), "taxonomy cache primed");
        Ok(())
    }

    /// Resolve a term name to its remote ID, creating the term on miss.
    ///
    /// Failures here are non-fatal by contract: a record is published with
    /// partial taxonomy rather than not at all. Both a failed (lazy) priming
    /// and a failed create log a warning and return `None`.
    pub async fn resolve(&mut self, client: &RemoteClient, name: &str) -> Option<u64> {
        if !self.primed
            && let Err(e) = self.prime(client).await
        {
            tracing::warn!(kind = self.kind.label(), error = %e, "term listing unavailable, omitting term");
            return None;
        }

        let key = normalize_key(name);
        if key.is_empty() {
            return None;
        }
        if let Some(id) = self.cache.get(&key) {
            return Some(*id);
        }

        match client.create_term(self.kind, name).await {
            Ok(term) => {
                tracing::info!(kind = self.kind.label(), name, id = term.id, "created missing term");
                self.cache.insert(key, term.id);
                Some(term.id)
            }
            Err(e) => {
                tracing::warn!(kind = self.kind.label(), name, error = %e, "could not create term, omitting");
                None
            }
        }
    }

    /// Resolve from the cache only, with no network fallback. Used by
    /// dry runs, which must not provision anything.
    pub fn resolve_cached(&self, name: &str) -> Option<u64> {
        self.cache.get(&normalize_key(name)).copied()
    }

    /// Number of cached terms.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether any terms are cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
