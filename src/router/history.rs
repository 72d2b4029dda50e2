use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Moves the user between views.
pub trait Navigator: Send + Sync {
    /// Returns to the previous location, like the browser's back button.
    fn go_back(&self);
}

/// An in-memory navigation stack.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, path: impl Into<String>) {
        self.lock().push(path.into());
    }

    pub fn current(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for History {
    fn go_back(&self) {
        let mut entries = self.lock();
        // The first entry stays; there is nothing before it
        if entries.len() > 1 {
            let left = entries.pop();
            debug!(left = ?left, back_to = ?entries.last(), "Navigated back");
        } else {
            debug!("Already at the first location");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_back_pops_to_previous() {
        let history = History::new();
        history.push("/beer");
        history.push("/beer/new");

        history.go_back();
        assert_eq!(history.current().as_deref(), Some("/beer"));

        history.go_back();
        assert_eq!(history.current().as_deref(), Some("/beer"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries(), vec!["/beer".to_string()]);
    }
}
