//! View controllers for the Beer screens.
//!
//! Each controller owns the state of one view in a [`tokio::sync::watch`] channel, so a
//! renderer can `subscribe()` and redraw on change. Controllers are shared behind an `Arc`
//! and every operation takes `&self`.
//!
//! Service failures are handed to the [`AlertSink`] first and then returned, so callers
//! may ignore them. Responses that arrive after [`unmount`](BeerListController::unmount)
//! are dropped instead of being written to a view nobody shows.

pub mod detail;
pub mod list;
pub mod update;

pub use detail::*;
pub use list::*;
pub use update::*;

use crate::alert::AlertSink;
use crate::clients::BeerClient;
use crate::locale::LocaleContext;
use crate::router::Navigator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Services a controller is built with.
#[derive(Clone)]
pub struct ViewContext {
    pub client: BeerClient,
    pub alerts: Arc<dyn AlertSink>,
    pub navigator: Arc<dyn Navigator>,
    pub locale: LocaleContext,
    pub toast_duration: Duration,
}

impl ViewContext {
    pub fn new(
        client: BeerClient,
        alerts: Arc<dyn AlertSink>,
        navigator: Arc<dyn Navigator>,
        locale: LocaleContext,
    ) -> Self {
        Self {
            client,
            alerts,
            navigator,
            locale,
            toast_duration: crate::alert::Toast::DEFAULT_AUTO_HIDE,
        }
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }
}

#[derive(Debug)]
pub(crate) struct MountGuard(AtomicBool);

impl MountGuard {
    pub(crate) fn new() -> Self {
        Self(AtomicBool::new(true))
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}
