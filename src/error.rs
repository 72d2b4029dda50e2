use crate::router::RouteError;
use resource_framework::ServiceError;
use thiserror::Error;

/// Errors surfaced by the application shell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Navigation(#[from] RouteError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Backend task failed: {0}")]
    Backend(String),
}
