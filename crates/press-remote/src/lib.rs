//! # press-remote
//!
//! HTTP client for the remote content store.
//!
//! The store exposes a WordPress-shape REST API: paginated `GET` collections
//! for content entities and taxonomy terms, `POST` to a collection to create,
//! `POST` to an item address to update. All requests authenticate with Basic
//! credentials.
//!
//! This crate is transport only. Identity resolution, change detection, and
//! write decisions live in `press-core`.

mod client;
mod error;
mod http;
mod types;

pub use client::{RemoteClient, TaxonomyKind};
pub use error::{RemoteError, Result};
pub use types::{EntityPayload, RemoteEntity, TaxonomyTerm, WriteReceipt};
