//! Remote store client.
//!
//! One client per run. Listings paginate the full collection including
//! non-public statuses, so draft entities are visible to the identity index.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http::check_response;
use crate::types::{EntityPayload, RemoteEntity, TaxonomyTerm, WriteReceipt};

/// Page size for collection listings.
const PER_PAGE: usize = 100;

/// The two taxonomy collections the store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    Category,
    Tag,
}

impl TaxonomyKind {
    /// Collection route under the API root.
    pub fn route(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "categories",
            TaxonomyKind::Tag => "tags",
        }
    }

    /// Human label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "category",
            TaxonomyKind::Tag => "tag",
        }
    }
}

/// HTTP client for one remote content store.
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    entity_route: String,
    username: String,
    password: String,
}

impl RemoteClient {
    /// Create a client for the store at `base_url`.
    ///
    /// `entity_route` is the content collection under the API root (for a
    /// stock store `posts`; custom entity types expose their own route).
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError::Transport`] if the underlying HTTP
    /// client cannot be built.
    pub fn new(
        base_url: &str,
        entity_route: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("content-press/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            entity_route: entity_route.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// The content collection route this client writes to.
    pub fn entity_route(&self) -> &str {
        &self.entity_route
    }

    fn collection_url(&self, route: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.base_url, route)
    }

    /// Fetch every page of a collection.
    ///
    /// The `status=any` filter makes non-public entities visible; the store
    /// ignores it on routes without a status field. A past-the-end page is
    /// reported as a 400, not an empty list, so both are exit conditions.
    async fn fetch_all<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>> {
        let collection = self.collection_url(route);
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let url = format!("{collection}?per_page={PER_PAGE}&page={page}&status=any");
            tracing::debug!(url = %url, "fetching collection page");
            let resp = self
                .http
                .get(&url)
                .basic_auth(&self.username, Some(&self.password))
                .send()
                .await?;

            if page > 1 && resp.status() == 400 {
                break;
            }
            let resp = check_response(resp).await?;

            let batch: Vec<T> = resp.json().await?;
            if batch.is_empty() {
                break;
            }
            let last_page = batch.len() < PER_PAGE;
            items.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// List all content entities, drafts included.
    pub async fn list_entities(&self) -> Result<Vec<RemoteEntity>> {
        let route = self.entity_route.clone();
        self.fetch_all(&route).await
    }

    /// List all terms of one taxonomy kind.
    pub async fn list_terms(&self, kind: TaxonomyKind) -> Result<Vec<TaxonomyTerm>> {
        self.fetch_all(kind.route()).await
    }

    /// Create a missing taxonomy term.
    pub async fn create_term(&self, kind: TaxonomyKind, name: &str) -> Result<TaxonomyTerm> {
        let url = self.collection_url(kind.route());
        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    /// Create a new content entity. The store assigns the ID.
    pub async fn create_entity(&self, payload: &EntityPayload) -> Result<WriteReceipt> {
        let url = self.collection_url(&self.entity_route);
        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(payload)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    /// Overwrite an existing entity at its item address.
    pub async fn update_entity(&self, id: u64, payload: &EntityPayload) -> Result<WriteReceipt> {
        let url = format!("{}/{}", self.collection_url(&self.entity_route), id);
        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(payload)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }
}
