//! # Channel Client
//!
//! `ResourceClient<T>` forwards every [`EntityService`] call over a Tokio mpsc channel and waits
//! for the answer on a oneshot channel. It holds only a sender, so clones are cheap and can be
//! shared across tasks.

use crate::entity::RestEntity;
use crate::error::ServiceError;
use crate::message::{ResourceRequest, Response};
use crate::query::{QueryParams, Retrieved};
use crate::service::EntityService;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a channel-served resource.
#[derive(Clone)]
pub struct ResourceClient<T: RestEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: RestEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        request: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, ServiceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| ServiceError::BackendClosed)?;
        response.await.map_err(|_| ServiceError::BackendDropped)?
    }
}

#[async_trait]
impl<T: RestEntity> EntityService<T> for ResourceClient<T> {
    async fn find(&self, id: T::Id) -> Result<T, ServiceError> {
        self.call(|respond_to| ResourceRequest::Find { id, respond_to })
            .await
    }

    async fn retrieve(&self, query: &QueryParams) -> Result<Retrieved<T>, ServiceError> {
        let query = query.clone();
        self.call(|respond_to| ResourceRequest::Retrieve { query, respond_to })
            .await
    }

    async fn create(&self, entity: T) -> Result<T, ServiceError> {
        self.call(|respond_to| ResourceRequest::Create { entity, respond_to })
            .await
    }

    async fn update(&self, entity: T) -> Result<T, ServiceError> {
        self.call(|respond_to| ResourceRequest::Update { entity, respond_to })
            .await
    }

    async fn partial_update(&self, entity: T) -> Result<T, ServiceError> {
        self.call(|respond_to| ResourceRequest::PartialUpdate { entity, respond_to })
            .await
    }

    async fn delete(&self, id: T::Id) -> Result<(), ServiceError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}
