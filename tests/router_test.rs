use beer_admin::router::{
    authorize, Authority, RouteError, RouteName, RouteParams, RouteTable, ViewKind,
};

#[test]
fn test_resolves_every_beer_route() {
    let table = RouteTable::entities();

    let list = table.resolve("/beer").unwrap();
    assert_eq!(list.route.name, RouteName::Beer);
    assert_eq!(list.route.view, ViewKind::List);
    assert!(list.params.is_empty());

    let create = table.resolve("beer/new").unwrap();
    assert_eq!(create.route.name, RouteName::BeerCreate);
    assert_eq!(create.route.view, ViewKind::Update);
    assert_eq!(create.params.beer_id(), None);

    let edit = table.resolve("/beer/12/edit/").unwrap();
    assert_eq!(edit.route.name, RouteName::BeerEdit);
    assert_eq!(edit.route.view, ViewKind::Update);
    assert_eq!(edit.params.beer_id(), Some(12));

    let view = table.resolve("beer/7/view").unwrap();
    assert_eq!(view.route.name, RouteName::BeerView);
    assert_eq!(view.route.view, ViewKind::Details);
    assert_eq!(view.params.get("beerId"), Some(7));
}

#[test]
fn test_non_integer_id_does_not_match() {
    let table = RouteTable::entities();
    assert!(table.resolve("beer/abc/view").is_none());
    assert!(table.resolve("beer/new/edit").is_none());
    assert!(table.resolve("beer/1").is_none());
    assert!(table.resolve("brewery").is_none());
}

#[test]
fn test_every_route_requires_user() {
    let table = RouteTable::entities();
    assert_eq!(table.routes().len(), 4);
    for route in table.routes() {
        assert_eq!(route.authorities, &[Authority::User]);
        assert_eq!(authorize(route, &[Authority::User]), Ok(()));
        assert_eq!(
            authorize(route, &[Authority::Admin]),
            Err(RouteError::Forbidden {
                path: route.path.to_string(),
                required: Authority::User,
            })
        );
    }
}

#[test]
fn test_href_builds_paths() {
    let table = RouteTable::entities();
    let params = RouteParams::new().with("beerId", 5);

    assert_eq!(table.href(RouteName::Beer, &params).unwrap(), "/beer");
    assert_eq!(
        table.href(RouteName::BeerCreate, &RouteParams::new()).unwrap(),
        "/beer/new"
    );
    assert_eq!(
        table.href(RouteName::BeerEdit, &params).unwrap(),
        "/beer/5/edit"
    );
    assert_eq!(
        table.href(RouteName::BeerView, &params).unwrap(),
        "/beer/5/view"
    );

    let round_trip = table.resolve(&table.href(RouteName::BeerView, &params).unwrap());
    assert_eq!(round_trip.unwrap().params, params);
}

#[test]
fn test_href_without_param_fails() {
    let table = RouteTable::entities();
    let err = table
        .href(RouteName::BeerEdit, &RouteParams::new())
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::MissingParam {
            route: RouteName::BeerEdit,
            param: "beerId".to_string(),
        }
    );
}
