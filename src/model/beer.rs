use crate::validation::FormFields;
use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

/// A beer record.
///
/// `id` is `None` until the backend has saved the beer; it is left out of the JSON body in
/// that case, which is what the create endpoint expects. `Beer::default()` is the blank
/// entity behind a "new beer" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Beer {
    pub fn new(id: Option<i64>, name: Option<String>) -> Self {
        Self { id, name }
    }

    /// A beer known only by its identifier.
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    /// An unsaved beer.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// The identifier as shown in notifications, empty for an unsaved beer.
    pub fn identifier(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }
}

impl RestEntity for Beer {
    type Id = i64;
    const RESOURCE: &'static str = "beers";
    const ENTITY_NAME: &'static str = "beer";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn merge(&mut self, patch: Self) {
        if patch.name.is_some() {
            self.name = patch.name;
        }
    }
}

impl FormFields for Beer {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            _ => None,
        }
    }
}
