//! # Generic Messages
//!
//! This module defines the message types exchanged between a [`ResourceClient`](crate::ResourceClient)
//! and whatever serves its channel: the in-process [`ResourceActor`](crate::ResourceActor) or the
//! test [`MockService`](crate::mock::MockService).

use crate::entity::RestEntity;
use crate::error::ServiceError;
use crate::query::{QueryParams, Retrieved};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel.
pub type Response<T> = oneshot::Sender<Result<T, ServiceError>>;

/// One request per [`EntityService`](crate::EntityService) operation.
///
/// The variants map 1:1 onto the REST verbs of the resource:
///
/// - **Find**: `GET /api/{resource}/{id}`
/// - **Retrieve**: `GET /api/{resource}`
/// - **Create**: `POST /api/{resource}`
/// - **Update**: `PUT /api/{resource}/{id}`
/// - **PartialUpdate**: `PATCH /api/{resource}/{id}`
/// - **Delete**: `DELETE /api/{resource}/{id}`
#[derive(Debug)]
pub enum ResourceRequest<T: RestEntity> {
    Find {
        id: T::Id,
        respond_to: Response<T>,
    },
    Retrieve {
        query: QueryParams,
        respond_to: Response<Retrieved<T>>,
    },
    Create {
        entity: T,
        respond_to: Response<T>,
    },
    Update {
        entity: T,
        respond_to: Response<T>,
    },
    PartialUpdate {
        entity: T,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
