//! User-facing notifications.
//!
//! Controllers never render anything themselves. Failed requests go to
//! [`AlertSink::show_http_error`] and successful saves or deletes raise a [`Toast`].
use resource_framework::ServiceError;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Info,
    Success,
    Warning,
    Danger,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: Variant,
    pub auto_hide: Duration,
}

impl Toast {
    pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(5000);

    pub fn new(title: impl Into<String>, message: impl Into<String>, variant: Variant) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant,
            auto_hide: Self::DEFAULT_AUTO_HIDE,
        }
    }

    pub fn auto_hide(mut self, delay: Duration) -> Self {
        self.auto_hide = delay;
        self
    }
}

/// Where controllers report errors and notifications.
pub trait AlertSink: Send + Sync {
    fn show_http_error(&self, error: &ServiceError);
    fn toast(&self, toast: Toast);
}

/// Writes every alert to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn show_http_error(&self, err: &ServiceError) {
        match err.http_response() {
            Some(response) => error!(
                status = response.status,
                message = %response.message,
                error_key = ?response.error_key,
                "Request rejected"
            ),
            None => error!(error = %err, "Request failed"),
        }
    }

    fn toast(&self, toast: Toast) {
        info!(
            title = %toast.title,
            variant = ?toast.variant,
            auto_hide_ms = toast.auto_hide.as_millis() as u64,
            "{}",
            toast.message
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    HttpError(ServiceError),
    Toast(Toast),
}

/// Keeps alerts in memory, in the order they were raised.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn errors(&self) -> Vec<ServiceError> {
        self.alerts()
            .into_iter()
            .filter_map(|alert| match alert {
                Alert::HttpError(err) => Some(err),
                Alert::Toast(_) => None,
            })
            .collect()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.alerts()
            .into_iter()
            .filter_map(|alert| match alert {
                Alert::Toast(toast) => Some(toast),
                Alert::HttpError(_) => None,
            })
            .collect()
    }

    fn push(&self, alert: Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert);
    }
}

impl AlertSink for RecordingAlerts {
    fn show_http_error(&self, err: &ServiceError) {
        self.push(Alert::HttpError(err.clone()));
    }

    fn toast(&self, toast: Toast) {
        self.push(Alert::Toast(toast));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::HttpErrorResponse;

    #[test]
    fn test_toast_defaults_to_five_seconds() {
        let toast = Toast::new("Info", "hello", Variant::Info);
        assert_eq!(toast.auto_hide, Duration::from_millis(5000));

        let toast = toast.auto_hide(Duration::from_millis(100));
        assert_eq!(toast.auto_hide, Duration::from_millis(100));
    }

    #[test]
    fn test_recording_keeps_order() {
        let alerts = RecordingAlerts::new();
        alerts.toast(Toast::new("Success", "first", Variant::Success));
        alerts.show_http_error(&HttpErrorResponse::new(500, "boom").into());

        assert_eq!(alerts.alerts().len(), 2);
        assert!(matches!(alerts.alerts()[0], Alert::Toast(_)));
        assert_eq!(alerts.errors()[0].status(), Some(500));
        assert_eq!(alerts.toasts()[0].message, "first");
    }
}
