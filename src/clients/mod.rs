//! Type-safe wrappers around [`EntityService`](resource_framework::EntityService).

pub mod beer_client;

pub use beer_client::*;
