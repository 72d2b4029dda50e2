//! # Beer Admin
//!
//! Administration screens for the `Beer` entity: a list with delete, a read-only detail
//! view and a create/edit form, backed by the `/api/beers` REST resource.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`resource_framework`])
//! Generic over any [`RestEntity`](resource_framework::RestEntity): the
//! [`EntityService`](resource_framework::EntityService) trait, its REST implementation,
//! an in-process backend actor and a mock for tests.
//!
//! ### 2. The Data ([`model`])
//! [`Beer`](model::Beer), an optional id and an optional name.
//!
//! ### 3. The Interface ([`clients`])
//! [`BeerClient`](clients::BeerClient) wraps whichever service is configured.
//!
//! ### 4. The Views ([`controllers`])
//! One controller per screen. They hold view state, call the client, report through an
//! [`AlertSink`](alert::AlertSink) and navigate with a [`Navigator`](router::Navigator).
//!
//! ### 5. The Shell ([`router`], [`config`], [`lifecycle`])
//! Route table, environment configuration and [`BeerApp`](lifecycle::BeerApp), which
//! ties everything together.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # In-process backend
//! RUST_LOG=info cargo run
//!
//! # Against a running API
//! BEER_API_URL=http://localhost:8080 RUST_LOG=info cargo run
//! ```

pub mod alert;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod error;
pub mod lifecycle;
pub mod locale;
pub mod model;
pub mod router;
pub mod validation;
