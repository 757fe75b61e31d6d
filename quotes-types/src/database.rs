//! Database connection options.
//!
//! Derived from the configuration snapshot's `database.url` and handed to
//! the document database driver, which owns retry and timeout enforcement.

use std::time::Duration;

use serde::{Serialize, Serializer};

pub const DEFAULT_RETRY_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_SOCKET_TIMEOUT: Duration = Duration::from_millis(45_000);

/// Options consumed by the database driver when connecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionOptions {
    /// Connection URI
    pub uri: String,
    /// Number of connection attempts before giving up
    #[serde(rename = "retryAttempts")]
    pub retry_attempts: u32,
    /// Delay between connection attempts
    #[serde(rename = "retryDelay", serialize_with = "as_millis")]
    pub retry_delay: Duration,
    /// Socket inactivity timeout
    #[serde(rename = "socketTimeoutMS", serialize_with = "as_millis")]
    pub socket_timeout: Duration,
}

fn as_millis<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}

impl ConnectionOptions {
    /// Derives options for `url` using the fixed retry and timeout policy.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            uri: url.into(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            socket_timeout: DEFAULT_SOCKET_TIMEOUT,
        }
    }

    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = timeout;
        self
    }
}
