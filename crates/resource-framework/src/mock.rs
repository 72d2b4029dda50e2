//! # Mock Service & Testing Guide
//!
//! `MockService<T>` serves a [`ResourceClient<T>`] from a queue of expectations instead of a
//! real backend, and records every call it receives. It lets you test view logic *around* the
//! service deterministically, including failures that are hard to provoke on a live API.
//!
//! ## When to use Mocks vs the In-Process Backend
//!
//! | Feature | MockService | ResourceActor |
//! |---------|-------------|---------------|
//! | **State** | None (scripted answers) | Real store |
//! | **Call counting** | Yes ([`MockService::count`]) | No |
//! | **Error Injection** | Easy (`return_err`) | Only what the REST rules produce |
//! | **Use Case** | Controller unit tests | End-to-end flows |
//!
//! ## Fluent API
//!
//! ```rust,ignore
//! let mut mock = MockService::<Beer>::new();
//! mock.expect_find(123).return_ok(Beer::with_id(123));
//!
//! let service = mock.client();
//! // drive the code under test...
//! assert_eq!(mock.count(CallKind::Find), 1);
//! mock.verify(); // every expectation consumed, no mismatches
//! ```
//!
//! ## Holding a Request In Flight
//!
//! To observe state *while* a call is pending (e.g. a saving flag), use [`create_mock_client`]
//! and answer the request yourself with the `expect_*` helpers:
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client::<Beer>(10);
//! let task = tokio::spawn(async move { controller.save().await });
//! let (entity, responder) = expect_update(&mut receiver).await.unwrap();
//! // state is observable here, the controller is suspended
//! responder.send(Ok(entity)).unwrap();
//! ```

use crate::client::ResourceClient;
use crate::entity::RestEntity;
use crate::error::ServiceError;
use crate::message::{ResourceRequest, Response};
use crate::query::{QueryParams, Retrieved};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// CALL LOG
// =============================================================================

/// The operation a request targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Find,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Delete,
}

/// A request as received by the mock, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Call<T: RestEntity> {
    Find(T::Id),
    Retrieve(QueryParams),
    Create(T),
    Update(T),
    PartialUpdate(T),
    Delete(T::Id),
}

impl<T: RestEntity> Call<T> {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::Find(_) => CallKind::Find,
            Self::Retrieve(_) => CallKind::Retrieve,
            Self::Create(_) => CallKind::Create,
            Self::Update(_) => CallKind::Update,
            Self::PartialUpdate(_) => CallKind::PartialUpdate,
            Self::Delete(_) => CallKind::Delete,
        }
    }
}

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give.
enum Expectation<T: RestEntity> {
    Find {
        id: T::Id,
        response: Result<T, ServiceError>,
    },
    Retrieve {
        response: Result<Retrieved<T>, ServiceError>,
    },
    Create {
        response: Result<T, ServiceError>,
    },
    Update {
        response: Result<T, ServiceError>,
    },
    PartialUpdate {
        response: Result<T, ServiceError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), ServiceError>,
    },
}

struct Shared<T: RestEntity> {
    expectations: VecDeque<Expectation<T>>,
    calls: Vec<Call<T>>,
    mismatches: Vec<String>,
}

/// A mock service with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next expectation is
/// recorded as a mismatch and its response channel is dropped, so the caller sees
/// [`ServiceError::BackendDropped`]; [`verify`](MockService::verify) reports it.
pub struct MockService<T: RestEntity> {
    client: ResourceClient<T>,
    shared: Arc<Mutex<Shared<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: RestEntity> Default for MockService<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RestEntity> MockService<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let shared = Arc::new(Mutex::new(Shared {
            expectations: VecDeque::new(),
            calls: Vec::new(),
            mismatches: Vec::new(),
        }));
        let shared_clone = shared.clone();

        // Spawn background task to answer requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                answer(&shared_clone, request);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            shared,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `find` for `id`.
    pub fn expect_find(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Find { id, response })
    }

    /// Expects a `retrieve`.
    pub fn expect_retrieve(&mut self) -> ExpectationBuilder<T, Retrieved<T>> {
        self.builder(|response| Expectation::Retrieve { response })
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects an `update`.
    pub fn expect_update(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Update { response })
    }

    /// Expects a `partial_update`.
    pub fn expect_partial_update(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::PartialUpdate { response })
    }

    /// Expects a `delete` for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, ServiceError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            shared: self.shared.clone(),
            make: Box::new(make),
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call<T>> {
        self.shared.lock().unwrap().calls.clone()
    }

    /// How many calls of `kind` were received so far.
    pub fn count(&self, kind: CallKind) -> usize {
        let state = self.shared.lock().unwrap();
        state.calls.iter().filter(|call| call.kind() == kind).count()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.shared.lock().unwrap();
        if !state.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

fn answer<T: RestEntity>(shared: &Mutex<Shared<T>>, request: ResourceRequest<T>) {
    let mut state = shared.lock().unwrap();
    let expectation = state.expectations.pop_front();

    match (request, expectation) {
        (
            ResourceRequest::Find { id, respond_to },
            Some(Expectation::Find {
                id: expected,
                response,
            }),
        ) => {
            state.calls.push(Call::Find(id));
            if id == expected {
                let _ = respond_to.send(response);
            } else {
                state
                    .mismatches
                    .push(format!("find: expected id {expected}, got {id}"));
            }
        }
        (
            ResourceRequest::Retrieve { query, respond_to },
            Some(Expectation::Retrieve { response }),
        ) => {
            state.calls.push(Call::Retrieve(query));
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Create { entity, respond_to },
            Some(Expectation::Create { response }),
        ) => {
            state.calls.push(Call::Create(entity));
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update { entity, respond_to },
            Some(Expectation::Update { response }),
        ) => {
            state.calls.push(Call::Update(entity));
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::PartialUpdate { entity, respond_to },
            Some(Expectation::PartialUpdate { response }),
        ) => {
            state.calls.push(Call::PartialUpdate(entity));
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete {
                id: expected,
                response,
            }),
        ) => {
            state.calls.push(Call::Delete(id));
            if id == expected {
                let _ = respond_to.send(response);
            } else {
                state
                    .mismatches
                    .push(format!("delete: expected id {expected}, got {id}"));
            }
        }
        (request, _) => {
            let call = record(request);
            state.mismatches.push(format!("unexpected {:?}", call.kind()));
            state.calls.push(call);
        }
    }
}

fn record<T: RestEntity>(request: ResourceRequest<T>) -> Call<T> {
    match request {
        ResourceRequest::Find { id, .. } => Call::Find(id),
        ResourceRequest::Retrieve { query, .. } => Call::Retrieve(query),
        ResourceRequest::Create { entity, .. } => Call::Create(entity),
        ResourceRequest::Update { entity, .. } => Call::Update(entity),
        ResourceRequest::PartialUpdate { entity, .. } => Call::PartialUpdate(entity),
        ResourceRequest::Delete { id, .. } => Call::Delete(id),
    }
}

/// Builder that queues one expectation with its answer.
pub struct ExpectationBuilder<T: RestEntity, R> {
    shared: Arc<Mutex<Shared<T>>>,
    make: Box<dyn FnOnce(Result<R, ServiceError>) -> Expectation<T> + Send>,
}

impl<T: RestEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: impl Into<ServiceError>) {
        self.push(Err(error.into()));
    }

    fn push(self, response: Result<R, ServiceError>) {
        let expectation = (self.make)(response);
        self.shared.lock().unwrap().expectations.push_back(expectation);
    }
}

// =============================================================================
// RECEIVER-DRIVEN HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Use this instead of [`MockService`] when the test must decide *when* a request resolves.
pub fn create_mock_client<T: RestEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Find request
pub async fn expect_find<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Find { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Retrieve request
pub async fn expect_retrieve<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(QueryParams, Response<Retrieved<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Retrieve { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: RestEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
