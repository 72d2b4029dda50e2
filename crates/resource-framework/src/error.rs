//! # Service Errors
//!
//! This module defines the error taxonomy shared by every [`EntityService`](crate::EntityService)
//! implementation. There is exactly one distinguished kind callers act on: the HTTP error
//! response ([`ServiceError::Http`]), carrying the status and the opaque payload the backend
//! sent. Everything else describes a failure to get an answer at all.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// A non-2xx answer from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    pub status: u16,
    /// Human readable summary (problem `title`, or the raw body).
    pub message: String,
    /// Backend error key such as `idexists`, when the body carries one.
    pub error_key: Option<String>,
    /// The parsed response body, `Null` when it was empty or not JSON.
    pub body: Value,
}

impl HttpErrorResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_key: None,
            body: Value::Null,
        }
    }

    /// Builds the response for an unknown identifier.
    pub fn not_found(entity_name: &str, id: impl fmt::Display) -> Self {
        let message = format!("{entity_name} {id} not found");
        Self {
            status: 404,
            body: json!({ "title": message, "status": 404 }),
            message,
            error_key: None,
        }
    }

    /// Builds a bad-request alert in the shape the REST backend uses
    /// (`title`, `message: "error.<key>"`, `entityName`, `errorKey`).
    pub fn bad_request(entity_name: &str, title: impl Into<String>, error_key: &str) -> Self {
        let title = title.into();
        Self {
            status: 400,
            body: json!({
                "title": title,
                "status": 400,
                "message": format!("error.{error_key}"),
                "entityName": entity_name,
                "errorKey": error_key,
            }),
            message: title,
            error_key: Some(error_key.to_owned()),
        }
    }

    /// Interprets a raw error body.
    ///
    /// JSON bodies contribute their `title` (or `message`) and `errorKey`; anything else is kept
    /// as text. `fallback` is used when the body is empty.
    pub fn from_body(status: u16, text: &str, fallback: Option<&str>) -> Self {
        let body: Value = serde_json::from_str(text).unwrap_or(Value::Null);
        let message = body
            .get("title")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_owned()))
            .unwrap_or_else(|| fallback.unwrap_or("HTTP error").to_owned());
        let error_key = body
            .get("errorKey")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        Self {
            status,
            message,
            error_key,
            body,
        }
    }
}

impl fmt::Display for HttpErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

/// Errors returned by entity services.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(HttpErrorResponse),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Cannot update a {0} without an id")]
    MissingId(&'static str),
    #[error("Backend closed")]
    BackendClosed,
    #[error("Backend dropped response channel")]
    BackendDropped,
}

impl ServiceError {
    /// The HTTP response object, if the backend answered.
    pub fn http_response(&self) -> Option<&HttpErrorResponse> {
        match self {
            Self::Http(response) => Some(response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.http_response().map(|r| r.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<HttpErrorResponse> for ServiceError {
    fn from(response: HttpErrorResponse) -> Self {
        Self::Http(response)
    }
}
