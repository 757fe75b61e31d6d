//! Per-request log record.

use std::time::Duration;

/// One completed request, as reported by the logging interceptor.
///
/// Displayed as `{METHOD} {URL} - {ELAPSED}ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLog {
    pub method: String,
    /// Request target as received (path and query string)
    pub url: String,
    pub elapsed: Duration,
}

impl RequestLog {
    pub fn new(method: impl Into<String>, url: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            elapsed,
        }
    }

    /// Elapsed time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

impl std::fmt::Display for RequestLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} - {}ms", self.method, self.url, self.elapsed_ms())
    }
}
