use super::{MountGuard, ViewContext};
use crate::alert::{Toast, Variant};
use crate::model::Beer;
use resource_framework::{QueryParams, ServiceError};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    PendingDelete,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeerListState {
    pub beers: Vec<Beer>,
    pub phase: ListPhase,
    pub is_fetching: bool,
    /// The beer the delete dialog asks about.
    pub removal: Option<Beer>,
    pub dialog_open: bool,
}

/// Controller of the beer list view.
pub struct BeerListController {
    ctx: ViewContext,
    state: watch::Sender<BeerListState>,
    mount: MountGuard,
}

impl BeerListController {
    pub fn new(ctx: ViewContext) -> Self {
        let (state, _) = watch::channel(BeerListState::default());
        Self {
            ctx,
            state,
            mount: MountGuard::new(),
        }
    }

    pub fn state(&self) -> BeerListState {
        self.state.borrow().clone()
    }

    pub fn beers(&self) -> Vec<Beer> {
        self.state.borrow().beers.clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.state.borrow().is_fetching
    }

    pub fn subscribe(&self) -> watch::Receiver<BeerListState> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    /// Loads the list when the view appears.
    pub async fn on_mount(&self) -> Result<(), ServiceError> {
        self.retrieve_all_beers().await
    }

    /// Replaces the list with what the backend holds.
    ///
    /// On failure the previous list is kept and the error goes to the alert sink.
    #[instrument(skip(self))]
    pub async fn retrieve_all_beers(&self) -> Result<(), ServiceError> {
        let previous = self.state.borrow().phase;
        self.state.send_modify(|s| {
            s.is_fetching = true;
            s.phase = ListPhase::Loading;
        });

        let result = self.ctx.client.retrieve(&QueryParams::new()).await;

        if !self.mount.is_mounted() {
            debug!("View unmounted, dropping beer list response");
            return result.map(|_| ()).inspect_err(|e| self.ctx.alerts.show_http_error(e));
        }

        match result {
            Ok(retrieved) => {
                let count = retrieved.items.len();
                self.state.send_modify(|s| {
                    s.beers = retrieved.items;
                    s.is_fetching = false;
                    s.phase = if s.removal.is_some() {
                        ListPhase::PendingDelete
                    } else {
                        ListPhase::Loaded
                    };
                });
                info!(count, "Beers loaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load beers");
                self.state.send_modify(|s| {
                    s.is_fetching = false;
                    s.phase = previous;
                });
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
        }
    }

    /// Clears the list and fetches it again.
    pub async fn handle_sync_list(&self) -> Result<(), ServiceError> {
        self.state.send_modify(|s| s.beers.clear());
        self.retrieve_all_beers().await
    }

    /// Opens the delete dialog for `beer`.
    pub fn prepare_remove(&self, beer: Beer) {
        debug!(id = ?beer.id, "Delete requested");
        self.state.send_modify(|s| {
            s.removal = Some(beer);
            s.dialog_open = true;
            s.phase = ListPhase::PendingDelete;
        });
    }

    /// Deletes the beer chosen with [`prepare_remove`](Self::prepare_remove).
    ///
    /// Does nothing when no beer is pending. The pending beer is cleared whatever the
    /// outcome; on success a toast is raised, the dialog closes and the list is fetched
    /// again.
    #[instrument(skip(self))]
    pub async fn remove_beer(&self) -> Result<(), ServiceError> {
        let pending = self.state.borrow().removal.clone();
        let Some(beer) = pending else {
            debug!("No beer pending removal");
            return Ok(());
        };

        let Some(id) = beer.id else {
            self.close_dialog();
            let err = ServiceError::MissingId("beer");
            self.ctx.alerts.show_http_error(&err);
            return Err(err);
        };

        let result = self.ctx.client.delete(id).await;
        self.close_dialog();

        match result {
            Ok(()) => {
                info!(id, "Beer deleted");
                self.ctx.alerts.toast(
                    Toast::new(
                        "Info",
                        format!("A Beer is deleted with identifier {id}"),
                        Variant::Danger,
                    )
                    .auto_hide(self.ctx.toast_duration),
                );
                if !self.mount.is_mounted() {
                    debug!("View unmounted, skipping refresh");
                    return Ok(());
                }
                self.retrieve_all_beers().await
            }
            Err(e) => {
                warn!(id, error = %e, "Failed to delete beer");
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
        }
    }

    /// Closes the delete dialog without deleting anything.
    pub fn close_dialog(&self) {
        self.state.send_modify(|s| {
            s.removal = None;
            s.dialog_open = false;
            if s.phase == ListPhase::PendingDelete {
                s.phase = ListPhase::Loaded;
            }
        });
    }
}
