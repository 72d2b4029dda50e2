use beer_admin::alert::{RecordingAlerts, Variant};
use beer_admin::clients::BeerClient;
use beer_admin::controllers::{BeerUpdateController, ViewContext};
use beer_admin::locale::LocaleContext;
use beer_admin::model::Beer;
use beer_admin::router::{History, RouteParams};
use resource_framework::mock::{
    create_mock_client, expect_create, expect_find, expect_update, Call, CallKind, MockService,
};
use resource_framework::{EntityService, HttpErrorResponse};
use std::sync::Arc;

struct Fixture {
    form: Arc<BeerUpdateController>,
    alerts: Arc<RecordingAlerts>,
    history: Arc<History>,
    locale: LocaleContext,
}

fn fixture(service: impl EntityService<Beer> + 'static, path: &str) -> Fixture {
    let alerts = Arc::new(RecordingAlerts::new());
    let history = Arc::new(History::new());
    history.push("/beer");
    history.push(path);
    let locale = LocaleContext::default();
    let ctx = ViewContext::new(
        BeerClient::new(service),
        alerts.clone(),
        history.clone(),
        locale.clone(),
    );
    Fixture {
        form: Arc::new(BeerUpdateController::new(ctx)),
        alerts,
        history,
        locale,
    }
}

#[tokio::test]
async fn test_save_with_id_updates() {
    let mut mock = MockService::<Beer>::new();
    mock.expect_find(123).return_ok(Beer::with_id(123));
    mock.expect_update().return_ok(Beer::with_id(123));

    let f = fixture(mock.client(), "/beer/123/edit");
    f.form
        .on_enter(&RouteParams::new().with("beerId", 123))
        .await
        .unwrap();
    assert_eq!(f.form.beer(), Beer::with_id(123));

    let saved = f.form.save().await.unwrap();

    assert_eq!(saved, Beer::with_id(123));
    assert!(!f.form.is_saving());
    assert_eq!(
        mock.calls(),
        vec![Call::Find(123), Call::Update(Beer::with_id(123))]
    );
    assert_eq!(mock.count(CallKind::Create), 0);

    assert_eq!(f.history.current().as_deref(), Some("/beer"));
    let toasts = f.alerts.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "A Beer is updated with identifier 123");
    assert_eq!(toasts[0].title, "Info");
    assert_eq!(toasts[0].variant, Variant::Info);
    mock.verify();
}

#[tokio::test]
async fn test_save_without_id_creates() {
    let mut mock = MockService::<Beer>::new();
    mock.expect_create().return_ok(Beer::with_id(7));

    let f = fixture(mock.client(), "/beer/new");
    f.form.on_enter(&RouteParams::new()).await.unwrap();

    let saved = f.form.save().await.unwrap();

    assert_eq!(saved.id, Some(7));
    assert!(!f.form.is_saving());
    assert_eq!(mock.calls(), vec![Call::Create(Beer::default())]);
    assert_eq!(mock.count(CallKind::Update), 0);

    assert_eq!(f.history.current().as_deref(), Some("/beer"));
    let toasts = f.alerts.toasts();
    assert_eq!(toasts[0].message, "A Beer is created with identifier 7");
    assert_eq!(toasts[0].title, "Success");
    assert_eq!(toasts[0].variant, Variant::Success);
    mock.verify();
}

#[tokio::test]
async fn test_create_sends_form_contents() {
    let mut mock = MockService::<Beer>::new();
    mock.expect_create()
        .return_ok(Beer::new(Some(1), Some("Stout".into())));

    let f = fixture(mock.client(), "/beer/new");
    f.form.set_name(Some("Stout".into()));
    f.form.save().await.unwrap();

    assert_eq!(mock.calls(), vec![Call::Create(Beer::named("Stout"))]);
    mock.verify();
}

#[tokio::test]
async fn test_is_saving_until_create_resolves() {
    let (client, mut receiver) = create_mock_client::<Beer>(10);
    let f = fixture(client, "/beer/new");
    assert!(!f.form.is_saving());

    let task = tokio::spawn({
        let form = f.form.clone();
        async move { form.save().await }
    });

    let (entity, responder) = expect_create(&mut receiver)
        .await
        .expect("Expected Create request");
    assert_eq!(entity, Beer::default());
    assert!(f.form.is_saving());

    responder.send(Ok(Beer::with_id(1))).unwrap();
    task.await.unwrap().unwrap();

    assert!(!f.form.is_saving());
}

#[tokio::test]
async fn test_subscribers_see_saving_toggle() {
    let (client, mut receiver) = create_mock_client::<Beer>(10);
    let f = fixture(client, "/beer/new");
    let mut rx = f.form.subscribe();

    let task = tokio::spawn({
        let form = f.form.clone();
        async move { form.save().await }
    });

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_saving);

    let (_entity, responder) = expect_create(&mut receiver)
        .await
        .expect("Expected Create request");
    responder.send(Ok(Beer::with_id(1))).unwrap();
    task.await.unwrap().unwrap();

    rx.changed().await.unwrap();
    let seen = rx.borrow_and_update().clone();
    assert!(!seen.is_saving);
    assert_eq!(seen.beer, Beer::default());
}

#[tokio::test]
async fn test_subscribers_see_loaded_beer() {
    let mut mock = MockService::<Beer>::new();
    mock.expect_find(3)
        .return_ok(Beer::new(Some(3), Some("Weizen".into())));

    let f = fixture(mock.client(), "/beer/3/edit");
    let mut rx = f.form.subscribe();

    f.form
        .on_enter(&RouteParams::new().with("beerId", 3))
        .await
        .unwrap();

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.beer, Beer::new(Some(3), Some("Weizen".into())));
    assert!(!seen.is_saving);
    mock.verify();
}

#[tokio::test]
async fn test_failed_update_clears_saving_and_keeps_form() {
    let (client, mut receiver) = create_mock_client::<Beer>(10);
    let f = fixture(client, "/beer/5/edit");
    let loaded = Beer::new(Some(5), Some("Bock".into()));
    let task = tokio::spawn({
        let form = f.form.clone();
        async move {
            form.retrieve_beer(5).await?;
            form.save().await
        }
    });

    let (id, responder) = expect_find(&mut receiver)
        .await
        .expect("Expected Find request");
    assert_eq!(id, 5);
    responder.send(Ok(loaded.clone())).unwrap();

    let (entity, responder) = expect_update(&mut receiver)
        .await
        .expect("Expected Update request");
    assert_eq!(entity, loaded);
    assert!(f.form.is_saving());
    responder
        .send(Err(HttpErrorResponse::bad_request("beer", "Entity not found", "idnotfound").into()))
        .unwrap();

    let err = task.await.unwrap().unwrap_err();

    assert!(!f.form.is_saving());
    assert_eq!(f.form.beer(), loaded);
    assert_eq!(f.history.current().as_deref(), Some("/beer/5/edit"));
    assert!(f.alerts.toasts().is_empty());
    assert_eq!(f.alerts.errors(), vec![err.clone()]);
    assert_eq!(
        err.http_response().and_then(|r| r.error_key.as_deref()),
        Some("idnotfound")
    );
}

#[tokio::test]
async fn test_failed_retrieve_keeps_blank_form() {
    let mut mock = MockService::<Beer>::new();
    mock.expect_find(9)
        .return_err(HttpErrorResponse::not_found("beer", 9));

    let f = fixture(mock.client(), "/beer/9/edit");
    let err = f
        .form
        .on_enter(&RouteParams::new().with("beerId", 9))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(f.form.beer(), Beer::default());
    assert_eq!(f.alerts.errors(), vec![err]);
    mock.verify();
}

#[tokio::test]
async fn test_save_after_unmount_stays_put() {
    let (client, mut receiver) = create_mock_client::<Beer>(10);
    let f = fixture(client, "/beer/new");

    let task = tokio::spawn({
        let form = f.form.clone();
        async move { form.save().await }
    });

    let (_entity, responder) = expect_create(&mut receiver)
        .await
        .expect("Expected Create request");
    f.form.unmount();
    f.history.push("/beer/1/view");
    responder.send(Ok(Beer::with_id(1))).unwrap();
    task.await.unwrap().unwrap();

    assert_eq!(f.history.current().as_deref(), Some("/beer/1/view"));
    assert_eq!(f.alerts.toasts().len(), 1);
}

#[tokio::test]
async fn test_current_language_follows_locale() {
    let mock = MockService::<Beer>::new();
    let f = fixture(mock.client(), "/beer/new");
    assert_eq!(f.form.current_language(), "en");

    f.locale.set("de");

    assert_eq!(f.form.current_language(), "de");
}

#[tokio::test]
async fn test_form_is_always_valid() {
    let mock = MockService::<Beer>::new();
    let f = fixture(mock.client(), "/beer/new");

    assert_eq!(f.form.validations().rules_for("name"), Some(&[][..]));
    assert!(f.form.is_valid());
    f.form.set_name(None);
    assert!(f.form.is_valid());
}

#[tokio::test]
async fn test_previous_state_goes_back() {
    let mock = MockService::<Beer>::new();
    let f = fixture(mock.client(), "/beer/new");

    f.form.previous_state();

    assert_eq!(f.history.current().as_deref(), Some("/beer"));
    assert!(mock.calls().is_empty());
}
