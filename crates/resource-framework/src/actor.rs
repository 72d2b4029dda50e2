//! # In-Process Backend
//!
//! `ResourceActor<T>` serves the REST contract of a resource from memory. It owns the store and
//! the receiver end of the channel and processes requests sequentially in its own Tokio task,
//! so the store needs no lock.
//!
//! The validation rules are the ones the REST backend applies:
//!
//! | Request        | Rejected when                  | Answer                    |
//! |----------------|--------------------------------|---------------------------|
//! | Create         | the entity already has an id   | 400 `idexists`            |
//! | Update / Patch | the entity has no id           | 400 `idnull`              |
//! | Update / Patch | the id is unknown              | 400 `idnotfound`          |
//! | Find / Delete  | the id is unknown              | 404                       |
//!
//! Retrieve returns every entity ordered by id with an `x-total-count` header. Query
//! parameters are logged and otherwise ignored.

use crate::client::ResourceClient;
use crate::entity::RestEntity;
use crate::error::HttpErrorResponse;
use crate::message::ResourceRequest;
use crate::query::Retrieved;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The in-process backend for one resource collection.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client`.
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Shutdown**: Drop every client clone; the loop ends when the channel closes.
pub struct ResourceActor<T: RestEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: RestEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. If the channel is full, calls on the
    /// client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop, processing requests until the channel closes.
    pub async fn run(mut self) {
        let resource = T::RESOURCE;
        info!(resource, "Backend started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Find { id, respond_to } => {
                    let found = self.store.get(&id).cloned();
                    debug!(resource, %id, found = found.is_some(), "Find");
                    let _ = respond_to.send(found.ok_or_else(|| {
                        HttpErrorResponse::not_found(T::ENTITY_NAME, id).into()
                    }));
                }
                ResourceRequest::Retrieve { query, respond_to } => {
                    debug!(resource, ?query, size = self.store.len(), "Retrieve");
                    let items: Vec<T> = self.store.values().cloned().collect();
                    let total = items.len();
                    let retrieved = Retrieved::new(items).with_header("x-total-count", total);
                    let _ = respond_to.send(Ok(retrieved));
                }
                ResourceRequest::Create { entity, respond_to } => {
                    debug!(resource, ?entity, "Create");
                    let _ = respond_to.send(self.create(entity).map_err(Into::into));
                }
                ResourceRequest::Update { entity, respond_to } => {
                    debug!(resource, ?entity, "Update");
                    let result = self.existing_mut(&entity).map(|stored| {
                        *stored = entity;
                        stored.clone()
                    });
                    if let Ok(updated) = &result {
                        info!(resource, id = ?updated.id(), "Updated");
                    }
                    let _ = respond_to.send(result.map_err(Into::into));
                }
                ResourceRequest::PartialUpdate { entity, respond_to } => {
                    debug!(resource, ?entity, "PartialUpdate");
                    let result = match self.existing_mut(&entity) {
                        Ok(stored) => {
                            stored.merge(entity);
                            Ok(stored.clone())
                        }
                        Err(e) => Err(e),
                    };
                    let _ = respond_to.send(result.map_err(Into::into));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(resource, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        info!(resource, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(resource, %id, "Not found");
                        let _ = respond_to
                            .send(Err(HttpErrorResponse::not_found(T::ENTITY_NAME, id).into()));
                    }
                }
            }
        }

        info!(resource, size = self.store.len(), "Shutdown");
    }

    fn create(&mut self, mut entity: T) -> Result<T, HttpErrorResponse> {
        if entity.id().is_some() {
            warn!(resource = T::RESOURCE, "Create rejected, id present");
            return Err(HttpErrorResponse::bad_request(
                T::ENTITY_NAME,
                format!("A new {} cannot already have an ID", T::ENTITY_NAME),
                "idexists",
            ));
        }
        let id = T::Id::from(self.next_id);
        self.next_id += 1;
        entity.set_id(id);
        self.store.insert(id, entity.clone());
        info!(resource = T::RESOURCE, %id, size = self.store.len(), "Created");
        Ok(entity)
    }

    fn existing_mut(&mut self, entity: &T) -> Result<&mut T, HttpErrorResponse> {
        let Some(id) = entity.id() else {
            warn!(resource = T::RESOURCE, "Update rejected, id missing");
            return Err(HttpErrorResponse::bad_request(T::ENTITY_NAME, "Invalid id", "idnull"));
        };
        self.store.get_mut(&id).ok_or_else(|| {
            warn!(resource = T::RESOURCE, %id, "Update rejected, not found");
            HttpErrorResponse::bad_request(T::ENTITY_NAME, "Entity not found", "idnotfound")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::query::QueryParams;
    use crate::service::EntityService;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Option<i64>,
        text: Option<String>,
    }

    impl RestEntity for Note {
        type Id = i64;
        const RESOURCE: &'static str = "notes";
        const ENTITY_NAME: &'static str = "note";

        fn id(&self) -> Option<i64> {
            self.id
        }

        fn set_id(&mut self, id: i64) {
            self.id = Some(id);
        }

        fn merge(&mut self, patch: Self) {
            if patch.text.is_some() {
                self.text = patch.text;
            }
        }
    }

    fn note(id: Option<i64>, text: &str) -> Note {
        Note {
            id,
            text: Some(text.to_string()),
        }
    }

    #[tokio::test]
    async fn test_backend_full_lifecycle() {
        let (actor, client) = ResourceActor::<Note>::new(10);
        let handle = tokio::spawn(actor.run());

        // 1. Create assigns sequential ids
        let first = client.create(note(None, "first")).await.unwrap();
        let second = client.create(note(None, "second")).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));

        // 2. Retrieve is ordered by id and counted
        let listed = client.retrieve(&QueryParams::new().with("page", 0)).await.unwrap();
        assert_eq!(listed.items, vec![first.clone(), second.clone()]);
        assert_eq!(listed.total_count(), Some(2));

        // 3. Update replaces, patch merges
        let updated = client.update(note(Some(1), "renamed")).await.unwrap();
        assert_eq!(updated.text.as_deref(), Some("renamed"));
        let patched = client
            .partial_update(Note { id: Some(1), text: None })
            .await
            .unwrap();
        assert_eq!(patched.text.as_deref(), Some("renamed"));

        // 4. Delete, then find fails with 404
        client.delete(2).await.unwrap();
        let err = client.find(2).await.unwrap_err();
        assert!(err.is_not_found());

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_backend_applies_rest_rules() {
        let (actor, client) = ResourceActor::<Note>::new(10);
        tokio::spawn(actor.run());

        let err = client.create(note(Some(7), "x")).await.unwrap_err();
        assert_eq!(err.http_response().unwrap().error_key.as_deref(), Some("idexists"));

        let err = client.update(note(None, "x")).await.unwrap_err();
        assert_eq!(err.http_response().unwrap().error_key.as_deref(), Some("idnull"));

        let err = client.update(note(Some(99), "x")).await.unwrap_err();
        assert_eq!(err.http_response().unwrap().error_key.as_deref(), Some("idnotfound"));

        let err = client.delete(99).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_closed_backend_reports_closed() {
        let (actor, client) = ResourceActor::<Note>::new(1);
        drop(actor);
        assert_eq!(client.find(1).await.unwrap_err(), ServiceError::BackendClosed);
    }
}
