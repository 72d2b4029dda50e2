use super::{MountGuard, ViewContext};
use crate::model::Beer;
use crate::router::RouteParams;
use resource_framework::ServiceError;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeerDetailState {
    pub beer: Beer,
}

/// Controller of the read-only beer view.
pub struct BeerDetailController {
    ctx: ViewContext,
    state: watch::Sender<BeerDetailState>,
    mount: MountGuard,
}

impl BeerDetailController {
    pub fn new(ctx: ViewContext) -> Self {
        let (state, _) = watch::channel(BeerDetailState::default());
        Self {
            ctx,
            state,
            mount: MountGuard::new(),
        }
    }

    pub fn state(&self) -> BeerDetailState {
        self.state.borrow().clone()
    }

    pub fn beer(&self) -> Beer {
        self.state.borrow().beer.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BeerDetailState> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    /// Loads the beer named by the `beerId` route parameter, if any.
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

    pub fn previous_state(&self) {
        self.ctx.navigator.go_back();
    }
}
