//! # HTTP Binding
//!
//! `HttpService<T>` implements [`EntityService`] against a REST backend with `reqwest`.
//! Requests go to `{base_url}/api/{T::RESOURCE}`; entities travel as JSON in both directions.
//!
//! Non-2xx answers become [`ServiceError::Http`] carrying the status and the body the backend
//! sent; connection failures and timeouts become [`ServiceError::Transport`].

use crate::entity::RestEntity;
use crate::error::{HttpErrorResponse, ServiceError};
use crate::query::{QueryParams, Retrieved};
use crate::service::EntityService;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, warn};

const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// REST client for one resource collection.
pub struct HttpService<T> {
    client: reqwest::Client,
    resource_url: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: RestEntity> HttpService<T> {
    /// Builds a client with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Uses an existing `reqwest::Client` (shared connection pool, custom headers).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            resource_url: format!("{}/api/{}", base_url.trim_end_matches('/'), T::RESOURCE),
            _entity: PhantomData,
        }
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    fn item_url(&self, id: T::Id) -> String {
        format!("{}/{}", self.resource_url, id)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ServiceError> {
    let response = request
        .send()
        .await
        .map_err(|e| ServiceError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let error = HttpErrorResponse::from_body(status.as_u16(), &text, status.canonical_reason());
    warn!(status = status.as_u16(), message = %error.message, "Request failed");
    Err(ServiceError::Http(error))
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ServiceError> {
    response
        .json()
        .await
        .map_err(|e| ServiceError::Serialization(format!("invalid response body: {e}")))
}

#[async_trait]
impl<T: RestEntity> EntityService<T> for HttpService<T> {
    async fn find(&self, id: T::Id) -> Result<T, ServiceError> {
        let url = self.item_url(id);
        debug!(%url, "GET");
        decode(send(self.client.get(&url)).await?).await
    }

    async fn retrieve(&self, query: &QueryParams) -> Result<Retrieved<T>, ServiceError> {
        debug!(url = %self.resource_url, ?query, "GET");
        let mut request = self.client.get(&self.resource_url);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        let response = send(request).await?;

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_owned(), value.to_owned()))
            })
            .collect();
        let items: Vec<T> = decode(response).await?;
        Ok(Retrieved { items, headers })
    }

    async fn create(&self, entity: T) -> Result<T, ServiceError> {
        debug!(url = %self.resource_url, ?entity, "POST");
        decode(send(self.client.post(&self.resource_url).json(&entity)).await?).await
    }

    async fn update(&self, entity: T) -> Result<T, ServiceError> {
        let id = entity.id().ok_or(ServiceError::MissingId(T::ENTITY_NAME))?;
        let url = self.item_url(id);
        debug!(%url, ?entity, "PUT");
        decode(send(self.client.put(&url).json(&entity)).await?).await
    }

    async fn partial_update(&self, entity: T) -> Result<T, ServiceError> {
        let id = entity.id().ok_or(ServiceError::MissingId(T::ENTITY_NAME))?;
        let url = self.item_url(id);
        debug!(%url, ?entity, "PATCH");
        let body = serde_json::to_vec(&entity)
            .map_err(|e| ServiceError::Serialization(format!("invalid request body: {e}")))?;
        let request = self
            .client
            .patch(&url)
            .header(CONTENT_TYPE, MERGE_PATCH_JSON)
            .body(body);
        decode(send(request).await?).await
    }

    async fn delete(&self, id: T::Id) -> Result<(), ServiceError> {
        let url = self.item_url(id);
        debug!(%url, "DELETE");
        send(self.client.delete(&url)).await?;
        Ok(())
    }
}
