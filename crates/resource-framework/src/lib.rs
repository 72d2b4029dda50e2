//! # Resource Framework
//!
//! Generic building blocks for talking to REST resources from async Rust. One trait describes
//! the entity ([`RestEntity`]), one trait describes the CRUD contract ([`EntityService`]), and
//! several interchangeable implementations serve that contract:
//!
//! | Implementation | Backed by | Use |
//! |----------------|-----------|-----|
//! | [`HttpService`] | `reqwest` against `{base}/api/{resource}` | Production |
//! | [`ResourceClient`] + [`ResourceActor`] | An in-memory store in its own Tokio task | Demos, end-to-end tests |
//! | [`ResourceClient`] + [`mock::MockService`] | Scripted expectations | Unit tests |
//!
//! Code that consumes the contract holds an `Arc<dyn EntityService<T>>` and never knows which
//! one it got.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`RestEntity`]) - the resource's id, path and merge rule
//! 2. **Contract Layer** ([`EntityService`]) - find, retrieve, create, update, partial update, delete
//! 3. **Transport Layer** ([`HttpService`], [`ResourceClient`]) - how a call reaches the backend
//!
//! ## Errors
//!
//! Every operation fails with a [`ServiceError`]. The one kind callers are expected to act on is
//! [`ServiceError::Http`]: the backend answered, and the [`HttpErrorResponse`] carries its status
//! and body verbatim. Nothing in this crate retries.
//!
//! ## Example
//!
//! ```rust
//! use resource_framework::{EntityService, QueryParams, ResourceActor, RestEntity};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Default, Serialize, Deserialize)]
//! struct Note {
//!     id: Option<i64>,
//!     text: Option<String>,
//! }
//!
//! impl RestEntity for Note {
//!     type Id = i64;
//!     const RESOURCE: &'static str = "notes";
//!     const ENTITY_NAME: &'static str = "note";
//!     fn id(&self) -> Option<i64> { self.id }
//!     fn set_id(&mut self, id: i64) { self.id = Some(id); }
//!     fn merge(&mut self, patch: Self) {
//!         if patch.text.is_some() { self.text = patch.text; }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (backend, client) = ResourceActor::<Note>::new(10);
//!     tokio::spawn(backend.run());
//!
//!     let saved = client.create(Note { id: None, text: Some("hello".into()) }).await.unwrap();
//!     assert_eq!(saved.id, Some(1));
//!
//!     let listed = client.retrieve(&QueryParams::new()).await.unwrap();
//!     assert_eq!(listed.total_count(), Some(1));
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for the expectation API and the receiver-driven helpers.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod http;
pub mod message;
pub mod mock;
pub mod query;
pub mod service;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::RestEntity;
pub use error::{HttpErrorResponse, ServiceError};
pub use http::HttpService;
pub use message::{ResourceRequest, Response};
pub use query::{QueryParams, Retrieved};
pub use service::EntityService;
