//! Remote store configuration.

use std::env;
use std::time::Duration;

use crate::util::normalize_text_option;

/// Default interval between remote subscription pulls.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(60);

const REMOTE_URL_ENV: &str = "ALCOVE_REMOTE_URL";
const REMOTE_TOKEN_ENV: &str = "ALCOVE_REMOTE_TOKEN";
const SYNC_INTERVAL_ENV: &str = "ALCOVE_SYNC_INTERVAL_SECS";

/// Configuration for the remote document store.
///
/// An unconfigured instance is a fully supported steady state: every remote
/// operation becomes a no-op and the workspace runs local-only.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote store base URL (e.g. `https://workspace.example.com`)
    pub base_url: Option<String>,
    /// Optional bearer token for remote requests
    pub auth_token: Option<String>,
    /// Interval between subscription pulls
    pub sync_interval: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_token: None,
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}

impl RemoteConfig {
    /// Create a configuration pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            auth_token: None,
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }

    /// Attach a bearer token for remote requests.
    #[must_use]
    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Set the subscription pull interval.
    #[must_use]
    pub const fn with_sync_interval(mut self, interval: Duration) -> Self {
        self.sync_interval = interval;
        self
    }

    /// Read configuration from `ALCOVE_REMOTE_URL`, `ALCOVE_REMOTE_TOKEN`,
    /// and `ALCOVE_SYNC_INTERVAL_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: normalize_text_option(env::var(REMOTE_URL_ENV).ok()),
            auth_token: normalize_text_option(env::var(REMOTE_TOKEN_ENV).ok()),
            sync_interval: sync_interval_from(env::var(SYNC_INTERVAL_ENV).ok()),
        }
    }

    /// Check if remote connectivity is configured.
    pub const fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }
}

fn sync_interval_from(raw: Option<String>) -> Duration {
    normalize_text_option(raw)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map_or(DEFAULT_SYNC_INTERVAL, Duration::from_secs)
}
