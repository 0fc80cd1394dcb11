//! Wire types for the remote content store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A text field the store renders server-side (`{"rendered": "..."}`).
///
/// Rendered text may contain HTML entities (`&amp;`, `&#8217;`, ...) even when
/// the submitted text did not; comparisons must normalize first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderedText {
    #[serde(default)]
    pub rendered: String,
}

/// A content entity as returned by the store's collection listing.
///
/// Only the fields the reconciliation engine indexes on. The engine never
/// keeps a long-lived copy of an entity; listings are fetched once per run to
/// build the identity index.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEntity {
    pub id: u64,
    #[serde(default)]
    pub title: RenderedText,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub link: String,
}

/// A classification term (category or tag) with its assigned ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    pub id: u64,
    pub name: String,
}

/// The exact payload transmitted on create and update.
///
/// This struct is also what gets fingerprinted for change detection, so its
/// contents must match the request body byte-for-byte in meaning: anything
/// added here changes fingerprints and forces one rewrite of every entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityPayload {
    pub title: String,
    pub content: String,
    pub status: String,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub meta: BTreeMap<String, String>,
}

/// Store response to a successful create or update.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteReceipt {
    pub id: u64,
    #[serde(default)]
    pub link: String,
}
