use beer_admin::alert::RecordingAlerts;
use beer_admin::clients::BeerClient;
use beer_admin::controllers::{BeerDetailController, ViewContext};
use beer_admin::locale::LocaleContext;
use beer_admin::model::Beer;
use beer_admin::router::{History, RouteParams};
use resource_framework::mock::{create_mock_client, expect_find, CallKind, MockService};
use resource_framework::{EntityService, HttpErrorResponse, ServiceError};
use std::sync::Arc;

fn details(
    service: impl EntityService<Beer> + 'static,
) -> (Arc<BeerDetailController>, Arc<RecordingAlerts>, Arc<History>) {
    let alerts = Arc::new(RecordingAlerts::new());
    let history = Arc::new(History::new());
    history.push("/beer");
    history.push("/beer/123/view");
    let ctx = ViewContext::new(
        BeerClient::new(service),
        alerts.clone(),
        history.clone(),
        LocaleContext::default(),
    );
    (Arc::new(BeerDetailController::new(ctx)), alerts, history)
}

#[tokio::test]
async fn test_retrieve_beer_assigns_entity() {
    let mut mock = MockService::<Beer>::new();
    mock.expect_find(123).return_ok(Beer::with_id(123));

    let (view, alerts, _history) = details(mock.client());
    view.retrieve_beer(123).await.unwrap();

    assert_eq!(view.beer(), Beer::with_id(123));
    assert!(alerts.alerts().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_retrieve_twice_gives_same_beer() {
    let stored = Beer::new(Some(4), Some("Gose".into()));
    let mut mock = MockService::<Beer>::new();
    mock.expect_find(4).return_ok(stored.clone());
    mock.expect_find(4).return_ok(stored.clone());

    let (view, _alerts, _history) = details(mock.client());
    view.retrieve_beer(4).await.unwrap();
    let first = view.beer();
    view.retrieve_beer(4).await.unwrap();

    assert_eq!(first, stored);
    assert_eq!(view.beer(), first);
    assert_eq!(mock.count(CallKind::Find), 2);
    mock.verify();
}

#[tokio::test]
async fn test_on_enter_reads_route_param() {
    let mut mock = MockService::<Beer>::new();
    mock.expect_find(123).return_ok(Beer::with_id(123));

    let (view, _alerts, _history) = details(mock.client());
    view.on_enter(&RouteParams::new().with("beerId", 123))
        .await
        .unwrap();

    assert_eq!(view.beer().id, Some(123));
    mock.verify();
}

#[tokio::test]
async fn test_on_enter_without_param_loads_nothing() {
    let mock = MockService::<Beer>::new();
    let (view, _alerts, _history) = details(mock.client());

    view.on_enter(&RouteParams::new()).await.unwrap();

    assert!(mock.calls().is_empty());
    assert_eq!(view.beer(), Beer::default());
}

#[tokio::test]
async fn test_failed_retrieve_keeps_previous_beer() {
    let stored = Beer::new(Some(1), Some("Lager".into()));
    let mut mock = MockService::<Beer>::new();
    mock.expect_find(1).return_ok(stored.clone());
    mock.expect_find(1)
        .return_err(HttpErrorResponse::new(503, "Service Unavailable"));

    let (view, alerts, _history) = details(mock.client());
    view.retrieve_beer(1).await.unwrap();
    let err = view.retrieve_beer(1).await.unwrap_err();

    assert_eq!(view.beer(), stored);
    assert_eq!(err.status(), Some(503));
    assert_eq!(alerts.errors(), vec![err]);
    mock.verify();
}

#[tokio::test]
async fn test_not_found_leaves_default() {
    let mut mock = MockService::<Beer>::new();
    mock.expect_find(404)
        .return_err(HttpErrorResponse::not_found("beer", 404));

    let (view, alerts, _history) = details(mock.client());
    let err = view.retrieve_beer(404).await.unwrap_err();

    assert!(matches!(err, ServiceError::Http(_)));
    assert_eq!(view.beer(), Beer::default());
    assert_eq!(alerts.errors().len(), 1);
}

#[tokio::test]
async fn test_late_beer_after_unmount_is_dropped() {
    let (client, mut receiver) = create_mock_client::<Beer>(10);
    let (view, _alerts, _history) = details(client);

    let task = tokio::spawn({
        let view = view.clone();
        async move { view.retrieve_beer(8).await }
    });

    let (id, responder) = expect_find(&mut receiver)
        .await
        .expect("Expected Find request");
    assert_eq!(id, 8);
    view.unmount();
    responder.send(Ok(Beer::with_id(8))).unwrap();
    task.await.unwrap().unwrap();

    assert_eq!(view.beer(), Beer::default());
}

#[tokio::test]
async fn test_previous_state_goes_back() {
    let mock = MockService::<Beer>::new();
    let (view, _alerts, history) = details(mock.client());

    view.previous_state();

    assert_eq!(history.current().as_deref(), Some("/beer"));
}
