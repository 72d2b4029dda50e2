//! # RestEntity Trait
//!
//! The `RestEntity` trait is the contract every resource (Beer, …) implements so the generic
//! services can talk about it: where it lives on the REST API, how its identifier looks, and
//! how a partial update is folded into a stored copy.
//!
//! # Architecture Note
//! The HTTP binding ([`HttpService`](crate::HttpService)), the in-process backend
//! ([`ResourceActor`](crate::ResourceActor)) and the test mock
//! ([`MockService`](crate::mock::MockService)) are all written *once* against this trait.
//! A new entity only has to describe itself here to get the whole CRUD surface.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be served through an
/// [`EntityService`](crate::EntityService).
///
/// An entity whose [`id`](RestEntity::id) is `None` has never been saved; one that carries an
/// id is assumed to exist server-side.
pub trait RestEntity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for sequential ID generation in the in-process backend.
    type Id: Copy + Ord + Display + Debug + Send + Sync + From<u32> + 'static;

    /// Path segment of the collection under `/api` (e.g. `"beers"`).
    const RESOURCE: &'static str;

    /// Singular name used in error messages (e.g. `"beer"`).
    const ENTITY_NAME: &'static str;

    /// The identifier, or `None` for a new entity.
    fn id(&self) -> Option<Self::Id>;

    /// Assigns the server-side identifier.
    fn set_id(&mut self, id: Self::Id);

    /// Applies the non-null fields of `patch` onto `self` (merge-patch semantics).
    fn merge(&mut self, patch: Self);
}
