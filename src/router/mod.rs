//! Beer routes and navigation.
//!
//! [`RouteTable`] maps paths to views and [`History`] is the [`Navigator`] controllers use
//! to go back after a save.

pub mod history;
pub mod table;

pub use history::*;
pub use table::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("No route matches {0}")]
    NoMatch(String),
    #[error("Access to {path} requires {required}")]
    Forbidden { path: String, required: Authority },
    #[error("Unknown route {0:?}")]
    UnknownRoute(RouteName),
    #[error("Route {route:?} needs parameter {param}")]
    MissingParam { route: RouteName, param: String },
    #[error("Unknown authority {0}")]
    UnknownAuthority(String),
}
