use crate::alert::AlertSink;
use crate::clients::BeerClient;
use crate::config::AppConfig;
use crate::controllers::{
    BeerDetailController, BeerListController, BeerUpdateController, ViewContext,
};
use crate::error::AppError;
use crate::locale::LocaleContext;
use crate::model::Beer;
use crate::router::{authorize, Authority, History, RouteError, RouteMatch, RouteTable, ViewKind};
use resource_framework::{EntityService, HttpService, ResourceActor};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

const BACKEND_BUFFER: usize = 32;
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// The controller mounted for the current location.
#[derive(Clone)]
pub enum ActiveView {
    List(Arc<BeerListController>),
    Update(Arc<BeerUpdateController>),
    Details(Arc<BeerDetailController>),
}

impl ActiveView {
    pub fn kind(&self) -> ViewKind {
        match self {
            ActiveView::List(_) => ViewKind::List,
            ActiveView::Update(_) => ViewKind::Update,
            ActiveView::Details(_) => ViewKind::Details,
        }
    }

    fn unmount(&self) {
        match self {
            ActiveView::List(view) => view.unmount(),
            ActiveView::Update(view) => view.unmount(),
            ActiveView::Details(view) => view.unmount(),
        }
    }
}

/// The Beer admin screens wired to a backend.
///
/// `BeerApp` is responsible for:
/// - **Backend selection**: the REST API when `BEER_API_URL` is set, otherwise an
///   in-process [`ResourceActor`] with the same rules
/// - **Routing**: resolving paths, checking authorities and recording history
/// - **View lifecycle**: unmounting the previous controller before mounting the next
///
/// ```ignore
/// let app = BeerApp::start(&AppConfig::from_env()?, Arc::new(LogAlerts))?;
/// if let ActiveView::List(list) = app.navigate("/beer").await? {
///     println!("{:?}", list.beers());
/// }
/// app.shutdown().await?;
/// ```
pub struct BeerApp {
    ctx: ViewContext,
    history: Arc<History>,
    routes: RouteTable,
    granted: Vec<Authority>,
    active: Mutex<Option<(String, ActiveView)>>,
    backend: Option<JoinHandle<()>>,
}

impl BeerApp {
    /// Starts the backend named by `config` and builds the app around it.
    ///
    /// The in-process backend is spawned on the current Tokio runtime.
    pub fn start(config: &AppConfig, alerts: Arc<dyn AlertSink>) -> Result<Self, AppError> {
        match &config.api_url {
            Some(url) => {
                info!(url = %url, "Using REST backend");
                let service = HttpService::<Beer>::new(url, config.request_timeout)?;
                Ok(Self::build(Arc::new(service), None, config, alerts))
            }
            None => {
                info!("Using in-process backend");
                let (actor, client) = ResourceActor::<Beer>::new(BACKEND_BUFFER);
                let handle = tokio::spawn(actor.run());
                Ok(Self::build(Arc::new(client), Some(handle), config, alerts))
            }
        }
    }

    /// Builds the app around an existing service.
    pub fn with_service(
        service: Arc<dyn EntityService<Beer>>,
        config: &AppConfig,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self::build(service, None, config, alerts)
    }

    fn build(
        service: Arc<dyn EntityService<Beer>>,
        backend: Option<JoinHandle<()>>,
        config: &AppConfig,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let history = Arc::new(History::new());
        let ctx = ViewContext::new(
            BeerClient::from_shared(service),
            alerts,
            history.clone(),
            LocaleContext::new(config.locale.clone()),
        )
        .with_toast_duration(config.toast_duration);

        Self {
            ctx,
            history,
            routes: RouteTable::entities(),
            granted: config.authorities.clone(),
            active: Mutex::new(None),
            backend,
        }
    }

    pub fn client(&self) -> &BeerClient {
        &self.ctx.client
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn locale(&self) -> &LocaleContext {
        &self.ctx.locale
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn active_view(&self) -> Option<ActiveView> {
        self.lock_active().as_ref().map(|(_, view)| view.clone())
    }

    /// Opens `path`, recording it in the history.
    ///
    /// Load failures of the new view are already reported to the alert sink and do not
    /// fail navigation; unknown paths and missing authorities do.
    pub async fn navigate(&self, path: &str) -> Result<ActiveView, AppError> {
        let matched = self.resolve(path)?;
        self.history.push(path);
        Ok(self.mount(path, matched).await)
    }

    /// Mounts the history's current location if the view on screen is for another one.
    ///
    /// Controllers move the history themselves (a save goes back), so call this after an
    /// operation that may have navigated.
    pub async fn sync(&self) -> Result<Option<ActiveView>, AppError> {
        let Some(location) = self.history.current() else {
            return Ok(None);
        };
        let on_screen = self.lock_active().as_ref().map(|(path, _)| path.clone());
        if on_screen.as_deref() == Some(location.as_str()) {
            return Ok(None);
        }
        let matched = self.resolve(&location)?;
        Ok(Some(self.mount(&location, matched).await))
    }

    fn resolve(&self, path: &str) -> Result<RouteMatch, AppError> {
        let matched = self
            .routes
            .resolve(path)
            .ok_or_else(|| RouteError::NoMatch(path.to_owned()))?;
        authorize(&matched.route, &self.granted)?;
        Ok(matched)
    }

    async fn mount(&self, path: &str, matched: RouteMatch) -> ActiveView {
        let previous = self.lock_active().take();
        if let Some((previous, view)) = previous {
            debug!(path = %previous, "Unmounting view");
            view.unmount();
        }

        info!(path, route = ?matched.route.name, "Mounting view");
        let ctx = self.ctx.clone();
        let (view, loaded) = match matched.route.view {
            ViewKind::List => {
                let controller = Arc::new(BeerListController::new(ctx));
                let loaded = controller.on_mount().await;
                (ActiveView::List(controller), loaded)
            }
            ViewKind::Update => {
                let controller = Arc::new(BeerUpdateController::new(ctx));
                let loaded = controller.on_enter(&matched.params).await;
                (ActiveView::Update(controller), loaded)
            }
            ViewKind::Details => {
                let controller = Arc::new(BeerDetailController::new(ctx));
                let loaded = controller.on_enter(&matched.params).await;
                (ActiveView::Details(controller), loaded)
            }
        };
        if let Err(e) = loaded {
            warn!(path, error = %e, "View opened without its data");
        }

        *self.lock_active() = Some((path.to_owned(), view.clone()));
        view
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<(String, ActiveView)>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unmounts the current view and stops the in-process backend.
    ///
    /// The backend stops once every client is gone, so views returned by
    /// [`navigate`](Self::navigate) should be dropped first. Shutdown gives up waiting
    /// after a few seconds.
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down beer admin...");
        let Self {
            ctx,
            active,
            backend,
            ..
        } = self;

        if let Some((_, view)) = active.into_inner().unwrap_or_else(PoisonError::into_inner) {
            view.unmount();
        }
        drop(ctx);

        if let Some(handle) = backend {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!("Backend task failed: {:?}", e);
                    return Err(AppError::Backend(e.to_string()));
                }
                Err(_) => warn!("Backend still has clients, leaving it running"),
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
