//! Query parameters and list results.
//!
//! Query parameters are opaque: services forward them as the URL query string and never
//! interpret them. Paging and sorting stay the backend's business.

use std::collections::BTreeMap;

/// Ordered key/value pairs appended to a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pair, keeping insertion order. Repeated keys are allowed (`sort=a&sort=b`).
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// The answer to a list request: the items in server order plus response metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieved<T> {
    pub items: Vec<T>,
    /// Response headers, names lower-cased.
    pub headers: BTreeMap<String, String>,
}

impl<T> Retrieved<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The `X-Total-Count` header, when the backend sent a valid one.
    pub fn total_count(&self) -> Option<usize> {
        self.header("x-total-count")?.parse().ok()
    }
}

impl<T> Default for Retrieved<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_keeps_order_and_duplicates() {
        let query = QueryParams::new()
            .with("page", 0)
            .with("sort", "name,asc")
            .with("sort", "id");
        let keys: Vec<&str> = query.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["page", "sort", "sort"]);
        assert!(!query.is_empty());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let retrieved = Retrieved::<u32>::new(vec![1, 2]).with_header("X-Total-Count", 2);
        assert_eq!(retrieved.header("x-total-count"), Some("2"));
        assert_eq!(retrieved.total_count(), Some(2));
        assert_eq!(Retrieved::<u32>::default().total_count(), None);
    }
}
