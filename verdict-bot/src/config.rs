//! Watcher configuration
//!
//! Defines the credentials and tunables of the watcher: review API access,
//! Telegram destination, polling period and request timeout.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Homework statuses endpoint of the review API
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Seconds between two polls
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

/// Seconds before an outbound HTTP request is abandoned
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Names of the required environment variables, in check order
pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// One or more required credentials are absent or empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required environment variables: {}", .0.join(", "))]
pub struct MissingCredentials(pub Vec<&'static str>);

/// Watcher configuration
///
/// Built once at startup and handed to the clients and the poller; nothing
/// reads credentials from the environment afterwards.
#[derive(Clone)]
pub struct Config {
    /// OAuth token for the review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives the notifications
    pub telegram_chat_id: String,

    /// Homework statuses endpoint
    pub endpoint: String,

    /// Pause between the end of one poll and the start of the next
    pub retry_period: Duration,

    /// Upper bound on every outbound HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a configuration with default tunables
    pub fn new(
        practicum_token: String,
        telegram_token: String,
        telegram_chat_id: String,
    ) -> Self {
        Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_period: Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Checks that every required credential is present
    ///
    /// Empty strings count as missing. All missing names are reported at once.
    pub fn from_credentials(
        practicum_token: Option<String>,
        telegram_token: Option<String>,
        telegram_chat_id: Option<String>,
    ) -> Result<Self, MissingCredentials> {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());

        let missing: Vec<&'static str> = [
            (PRACTICUM_TOKEN, present(&practicum_token)),
            (TELEGRAM_TOKEN, present(&telegram_token)),
            (TELEGRAM_CHAT_ID, present(&telegram_chat_id)),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect();

        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum), Some(telegram), Some(chat_id)) if missing.is_empty() => {
                Ok(Self::new(practicum, telegram, chat_id))
            }
            _ => Err(MissingCredentials(missing)),
        }
    }

    /// Overrides the homework statuses endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the polling period
    pub fn with_retry_period(mut self, retry_period: Duration) -> Self {
        self.retry_period = retry_period;
        self
    }

    /// Overrides the request timeout
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint.is_empty() {
            anyhow::bail!("endpoint cannot be empty");
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            anyhow::bail!("endpoint must start with http:// or https://");
        }

        if self.retry_period.is_zero() {
            anyhow::bail!("retry_period must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

// Credentials stay out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("retry_period", &self.retry_period)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
