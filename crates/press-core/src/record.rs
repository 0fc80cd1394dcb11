//! The declarative content document.
//!
//! Records are declared in a TOML document (`content.toml` by default) as
//! `[[records]]` tables. The document is the source of truth: a run never
//! mutates it, and every run reconciles the remote store toward it.

use crate::normalize::normalize_key;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Publication status of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
}

impl ContentStatus {
    /// The status string the store's API expects.
    pub fn as_wire(self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "publish",
        }
    }
}

/// One locally declared content record, immutable during a run.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentRecord {
    /// Display title; doubles as the identity key when no remote ID is set.
    pub title: String,
    /// Structured body (HTML), transmitted verbatim.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub status: ContentStatus,
    /// Category names; missing terms are provisioned on demand.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Tag names; missing terms are provisioned on demand.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form metadata transmitted alongside the body.
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    /// Explicit remote identifier. When set it is trusted outright and
    /// title matching is skipped.
    #[serde(default)]
    pub remote_id: Option<u64>,
}

/// Metadata key checked by the governance pass.
const RELATED_PROJECT_KEY: &str = "related_project";

/// The parsed content document: declared projects plus all records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentSet {
    /// Known project identifiers for governance validation.
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub records: Vec<ContentRecord>,
}

impl ContentSet {
    /// Parse a content document from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or does not match
    /// the record schema.
    pub fn parse(content: &str) -> Result<Self> {
        let set: ContentSet = toml::from_str(content)?;
        Ok(set)
    }

    /// Load a content document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContentNotFound`] if the file does not exist, or a
    /// parse error if it is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ContentNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Validate the document and return human-readable warnings.
    ///
    /// Two checks, both advisory:
    /// - a record's `meta.related_project` names a project not declared in
    ///   `projects` (skipped entirely when no projects are declared)
    /// - two records' titles normalize to the same comparison key, which
    ///   would make them resolve to the same remote entity
    pub fn governance_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.projects.is_empty() {
            for record in &self.records {
                if let Some(project) = record.meta.get(RELATED_PROJECT_KEY)
                    && !self.projects.contains(project)
                {
                    warnings.push(format!(
                        "Record '{}' references undeclared project '{}'",
                        record.title, project
                    ));
                }
            }
        }

        let mut seen: HashMap<String, &str> = HashMap::new();
        for record in &self.records {
            let key = normalize_key(&record.title);
            if key.is_empty() {
                warnings.push(format!(
                    "Record '{}' has a title that normalizes to nothing and cannot be matched",
                    record.title
                ));
                continue;
            }
            if let Some(first) = seen.get(&key) {
                warnings.push(format!(
                    "Titles '{}' and '{}' normalize to the same key; both will resolve to one remote entity",
                    first, record.title
                ));
            } else {
                seen.insert(key, record.title.as_str());
            }
        }

        warnings
    }
}
