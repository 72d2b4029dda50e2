//! Pure data structures implementing the [`RestEntity`](resource_framework::RestEntity) trait.

pub mod beer;

pub use beer::*;
