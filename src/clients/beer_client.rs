//! # Beer Client
//!
//! The Beer entity service the view controllers use. It wraps any
//! [`EntityService<Beer>`](resource_framework::EntityService), so the same controllers run
//! against the REST API, the in-process backend, or a test mock.
use crate::model::Beer;
use resource_framework::{EntityService, QueryParams, Retrieved, ServiceError};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for the `/api/beers` resource.
#[derive(Clone)]
pub struct BeerClient {
    inner: Arc<dyn EntityService<Beer>>,
}

impl BeerClient {
    pub fn new(service: impl EntityService<Beer> + 'static) -> Self {
        Self {
            inner: Arc::new(service),
        }
    }

    pub fn from_shared(inner: Arc<dyn EntityService<Beer>>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: i64) -> Result<Beer, ServiceError> {
        debug!("Sending request");
        self.inner.find(id).await
    }

    #[instrument(skip(self))]
    pub async fn retrieve(&self, query: &QueryParams) -> Result<Retrieved<Beer>, ServiceError> {
        debug!("Sending request");
        self.inner.retrieve(query).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, beer: Beer) -> Result<Beer, ServiceError> {
        debug!("Sending request");
        self.inner.create(beer).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, beer: Beer) -> Result<Beer, ServiceError> {
        debug!("Sending request");
        self.inner.update(beer).await
    }

    #[instrument(skip(self))]
    pub async fn partial_update(&self, beer: Beer) -> Result<Beer, ServiceError> {
        debug!("Sending request");
        self.inner.partial_update(beer).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
