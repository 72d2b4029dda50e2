use super::{MountGuard, ViewContext};
use crate::alert::{Toast, Variant};
use crate::model::Beer;
use crate::router::RouteParams;
use crate::validation::{beer_validations, Validations};
use resource_framework::ServiceError;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeerUpdateState {
    pub beer: Beer,
    pub is_saving: bool,
}

/// Controller of the create/edit form.
///
/// The form starts from a blank beer. Entering through `beer/:beerId/edit` loads the
/// stored beer into it, and [`save`](Self::save) updates when the beer has an id and
/// creates otherwise.
pub struct BeerUpdateController {
    ctx: ViewContext,
    state: watch::Sender<BeerUpdateState>,
    mount: MountGuard,
    validations: Validations,
}

impl BeerUpdateController {
    pub fn new(ctx: ViewContext) -> Self {
        let (state, _) = watch::channel(BeerUpdateState::default());
        Self {
            ctx,
            state,
            mount: MountGuard::new(),
            validations: beer_validations(),
        }
    }

    pub fn state(&self) -> BeerUpdateState {
        self.state.borrow().clone()
    }

    pub fn beer(&self) -> Beer {
        self.state.borrow().beer.clone()
    }

    pub fn is_saving(&self) -> bool {
        self.state.borrow().is_saving
    }

    pub fn subscribe(&self) -> watch::Receiver<BeerUpdateState> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    /// The UI language at the time of the call.
    pub fn current_language(&self) -> String {
        self.ctx.locale.current()
    }

    pub fn validations(&self) -> &Validations {
        &self.validations
    }

    pub fn is_valid(&self) -> bool {
        self.validations.is_valid(&self.state.borrow().beer)
    }

    pub fn set_name(&self, name: Option<String>) {
        self.state.send_modify(|s| s.beer.name = name);
    }

    pub async fn on_enter(&self, params: &RouteParams) -> Result<(), ServiceError> {
        match params.beer_id() {
            Some(id) => self.retrieve_beer(id).await,
            None => Ok(()),
        }
    }

    #[instrument(skip(self))]
    pub async fn retrieve_beer(&self, id: i64) -> Result<(), ServiceError> {
        let result = self.ctx.client.find(id).await;
        match result {
            Ok(beer) if self.mount.is_mounted() => {
                self.state.send_modify(|s| s.beer = beer);
                Ok(())
            }
            Ok(_) => {
                debug!("View unmounted, dropping beer");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load beer");
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
        }
    }

    /// Sends the form to the backend.
    ///
    /// `is_saving` is set for the duration of the request. On success the user is sent
    /// back to the previous view and a toast names the saved identifier; on failure the
    /// form keeps its contents.
    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<Beer, ServiceError> {
        let beer = self.beer();
        let updating = !beer.is_new();
        self.state.send_modify(|s| s.is_saving = true);

        let result = if updating {
            self.ctx.client.update(beer).await
        } else {
            self.ctx.client.create(beer).await
        };

        self.state.send_modify(|s| s.is_saving = false);

        match result {
            Ok(saved) => {
                let id = saved.identifier();
                let toast = if updating {
                    info!(id = %id, "Beer updated");
                    Toast::new(
                        "Info",
                        format!("A Beer is updated with identifier {id}"),
                        Variant::Info,
                    )
                } else {
                    info!(id = %id, "Beer created");
                    Toast::new(
                        "Success",
                        format!("A Beer is created with identifier {id}"),
                        Variant::Success,
                    )
                };

                if self.mount.is_mounted() {
                    self.ctx.navigator.go_back();
                } else {
                    debug!("View unmounted, staying where the user went");
                }
                self.ctx
                    .alerts
                    .toast(toast.auto_hide(self.ctx.toast_duration));
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "Failed to save beer");
                self.ctx.alerts.show_http_error(&e);
                Err(e)
            }
        }
    }

    pub fn previous_state(&self) {
        self.ctx.navigator.go_back();
    }
}
