//! Application configuration loaded from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `BEER_API_URL` | unset | Base URL of the REST API. Unset runs the in-process backend. |
//! | `BEER_REQUEST_TIMEOUT_MS` | `10000` | Per-request timeout of the HTTP client. |
//! | `BEER_TOAST_MS` | `5000` | How long toasts stay visible. |
//! | `BEER_LOCALE` | `en` | Initial UI language. |
//! | `BEER_AUTHORITIES` | `ROLE_USER` | Comma-separated authorities of the signed-in user. |

use crate::error::AppError;
use crate::router::Authority;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub request_timeout: Duration,
    pub toast_duration: Duration,
    pub locale: String,
    pub authorities: Vec<Authority>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout: Duration::from_millis(10_000),
            toast_duration: Duration::from_millis(5_000),
            locale: "en".to_owned(),
            authorities: vec![Authority::User],
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let api_url = lookup("BEER_API_URL")
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());

        let request_timeout =
            millis(&lookup, "BEER_REQUEST_TIMEOUT_MS")?.unwrap_or(defaults.request_timeout);
        let toast_duration = millis(&lookup, "BEER_TOAST_MS")?.unwrap_or(defaults.toast_duration);

        let locale = lookup("BEER_LOCALE")
            .map(|locale| locale.trim().to_owned())
            .filter(|locale| !locale.is_empty())
            .unwrap_or(defaults.locale);

        let authorities = match lookup("BEER_AUTHORITIES") {
            Some(raw) => raw
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| {
                    part.parse::<Authority>()
                        .map_err(|e| AppError::Config(format!("BEER_AUTHORITIES: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.authorities,
        };

        Ok(Self {
            api_url,
            request_timeout,
            toast_duration,
            locale,
            authorities,
        })
    }
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Duration>, AppError> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| AppError::Config(format!("{key} must be milliseconds: {e}")))
        })
        .transpose()
}
