use beer_admin::alert::LogAlerts;
use beer_admin::config::AppConfig;
use beer_admin::error::AppError;
use beer_admin::lifecycle::{setup_tracing, ActiveView, BeerApp};
use beer_admin::router::{RouteName, RouteParams};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(api_url = ?config.api_url, locale = %config.locale, "Starting beer admin");

    let app = BeerApp::start(&config, Arc::new(LogAlerts))?;

    app.navigate("/beer").await?;

    // Create a beer through the form
    let span = tracing::info_span!("beer_creation");
    let created = async {
        let ActiveView::Update(form) = app.navigate("/beer/new").await? else {
            return Ok(None);
        };
        form.set_name(Some("Hazy IPA".to_string()));
        info!(language = %form.current_language(), valid = form.is_valid(), "Submitting form");
        let saved = form.save().await?;
        Ok::<_, AppError>(Some(saved))
    }
    .instrument(span)
    .await?;

    // The form went back to the list
    if let Some(ActiveView::List(list)) = app.sync().await? {
        info!(beers = ?list.beers(), "Back on the list");
    }

    let Some(id) = created.and_then(|beer| beer.id) else {
        warn!("Nothing was created");
        return app.shutdown().await;
    };

    let view_path = app
        .routes()
        .href(RouteName::BeerView, &RouteParams::new().with("beerId", id))?;
    if let ActiveView::Details(details) = app.navigate(&view_path).await? {
        info!(beer = ?details.beer(), "Viewing beer");
        details.previous_state();
    }
    app.sync().await?;

    // Rename it
    let span = tracing::info_span!("beer_update");
    async {
        let edit_path = app
            .routes()
            .href(RouteName::BeerEdit, &RouteParams::new().with("beerId", id))?;
        if let ActiveView::Update(form) = app.navigate(&edit_path).await? {
            form.set_name(Some("West Coast IPA".to_string()));
            form.save().await?;
        }
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    // Delete it from the list
    let span = tracing::info_span!("beer_deletion");
    async {
        if let Some(ActiveView::List(list)) = app.sync().await? {
            if let Some(beer) = list.beers().into_iter().find(|b| b.id == Some(id)) {
                list.prepare_remove(beer);
                list.remove_beer().await?;
            }
            info!(remaining = list.beers().len(), "Beer list after delete");
        }
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    app.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
