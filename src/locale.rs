use std::sync::Arc;
use tokio::sync::watch;

/// The shared UI language.
///
/// Clones share one value, so a change made through any clone is visible to every
/// controller on its next read.
#[derive(Debug, Clone)]
pub struct LocaleContext {
    sender: Arc<watch::Sender<String>>,
}

impl LocaleContext {
    pub fn new(language: impl Into<String>) -> Self {
        let (sender, _) = watch::channel(language.into());
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> String {
        self.sender.borrow().clone()
    }

    pub fn set(&self, language: impl Into<String>) {
        self.sender.send_replace(language.into());
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.sender.subscribe()
    }
}

impl Default for LocaleContext {
    fn default() -> Self {
        Self::new("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_change_is_seen_by_clones_and_subscribers() {
        let locale = LocaleContext::default();
        let shared = locale.clone();
        let mut changes = locale.subscribe();

        shared.set("fr");

        assert_eq!(locale.current(), "fr");
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow(), "fr");
    }
}
