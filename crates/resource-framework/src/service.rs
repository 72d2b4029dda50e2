//! # EntityService Trait
//!
//! The CRUD contract view controllers depend on. It is object safe (`#[async_trait]`), so
//! callers hold an `Arc<dyn EntityService<T>>` and never learn whether the other side is the
//! REST API, the in-process backend or a test mock.

use crate::entity::RestEntity;
use crate::error::ServiceError;
use crate::query::{QueryParams, Retrieved};
use async_trait::async_trait;

/// Asynchronous CRUD operations on one resource collection.
///
/// No implementation retries; failures are returned to the caller as they happened.
#[async_trait]
pub trait EntityService<T: RestEntity>: Send + Sync {
    /// Fetch one entity. Unknown ids fail with an HTTP 404.
    async fn find(&self, id: T::Id) -> Result<T, ServiceError>;

    /// Fetch the collection, in the order the backend returns it.
    async fn retrieve(&self, query: &QueryParams) -> Result<Retrieved<T>, ServiceError>;

    /// Persist a new entity. It must not carry an id; the returned copy has the assigned one.
    async fn create(&self, entity: T) -> Result<T, ServiceError>;

    /// Replace an existing entity. It must carry an id.
    async fn update(&self, entity: T) -> Result<T, ServiceError>;

    /// Apply the non-null fields of `entity` to the stored one.
    async fn partial_update(&self, entity: T) -> Result<T, ServiceError>;

    /// Remove an entity. Unknown ids fail with an HTTP 404.
    async fn delete(&self, id: T::Id) -> Result<(), ServiceError>;
}
