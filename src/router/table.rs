use super::RouteError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Route parameter carrying the beer identifier.
pub const BEER_ID: &str = "beerId";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Authority {
    User,
    Admin,
}

impl Authority {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Authority::User => "ROLE_USER",
            Authority::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Authority {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ROLE_USER" => Ok(Authority::User),
            "ROLE_ADMIN" => Ok(Authority::Admin),
            other => Err(RouteError::UnknownAuthority(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Beer,
    BeerCreate,
    BeerEdit,
    BeerView,
}

/// The view a route mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    List,
    Update,
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: RouteName,
    pub view: ViewKind,
    pub authorities: &'static [Authority],
}

/// The Beer routes, registered under the `Entities` parent at `/`.
pub const ENTITY_ROUTES: [Route; 4] = [
    Route {
        path: "beer",
        name: RouteName::Beer,
        view: ViewKind::List,
        authorities: &[Authority::User],
    },
    Route {
        path: "beer/new",
        name: RouteName::BeerCreate,
        view: ViewKind::Update,
        authorities: &[Authority::User],
    },
    Route {
        path: "beer/:beerId/edit",
        name: RouteName::BeerEdit,
        view: ViewKind::Update,
        authorities: &[Authority::User],
    },
    Route {
        path: "beer/:beerId/view",
        name: RouteName::BeerView,
        view: ViewKind::Details,
        authorities: &[Authority::User],
    },
];

/// Integer parameters extracted from a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, i64>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    pub fn beer_id(&self) -> Option<i64> {
        self.get(BEER_ID)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub params: RouteParams,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn entities() -> Self {
        Self::new(ENTITY_ROUTES.to_vec())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn by_name(&self, name: RouteName) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Finds the route matching `path`.
    ///
    /// Leading and trailing slashes are ignored and a `:param` segment only matches an
    /// integer, so `beer/abc/view` resolves to nothing.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = path.trim_matches('/');
        self.routes.iter().find_map(|route| {
            match_path(route.path, path).map(|params| RouteMatch {
                route: *route,
                params,
            })
        })
    }

    /// Builds the path of a named route.
    pub fn href(&self, name: RouteName, params: &RouteParams) -> Result<String, RouteError> {
        let route = self.by_name(name).ok_or(RouteError::UnknownRoute(name))?;
        let segments = route
            .path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(param) => params
                    .get(param)
                    .map(|value| value.to_string())
                    .ok_or_else(|| RouteError::MissingParam {
                        route: name,
                        param: param.to_string(),
                    }),
                None => Ok(segment.to_string()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("/{}", segments.join("/")))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::entities()
    }
}

fn match_path(pattern: &str, path: &str) -> Option<RouteParams> {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    let mut params = RouteParams::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => match expected.strip_prefix(':') {
                Some(name) => params = params.with(name, actual.parse().ok()?),
                None if expected == actual => {}
                None => return None,
            },
            _ => return None,
        }
    }
}

/// Checks that `granted` holds every authority the route requires.
pub fn authorize(route: &Route, granted: &[Authority]) -> Result<(), RouteError> {
    match route
        .authorities
        .iter()
        .find(|required| !granted.contains(*required))
    {
        Some(required) => Err(RouteError::Forbidden {
            path: route.path.to_string(),
            required: *required,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_path_extracts_integer_params() {
        let params = match_path("beer/:beerId/edit", "beer/42/edit").unwrap();
        assert_eq!(params.beer_id(), Some(42));

        assert!(match_path("beer/:beerId/edit", "beer/x/edit").is_none());
        assert!(match_path("beer/:beerId/edit", "beer/42").is_none());
        assert!(match_path("beer", "beer/42").is_none());
    }

    #[test]
    fn test_authority_parse() {
        assert_eq!("ROLE_USER".parse::<Authority>(), Ok(Authority::User));
        assert_eq!(" ROLE_ADMIN ".parse::<Authority>(), Ok(Authority::Admin));
        assert_eq!(
            "ROLE_GUEST".parse::<Authority>(),
            Err(RouteError::UnknownAuthority("ROLE_GUEST".into()))
        );
    }
}
