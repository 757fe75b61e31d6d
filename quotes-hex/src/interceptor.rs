//! Request Logging Interceptor
//!
//! Wraps a request-handling operation, measures its wall-clock latency, and
//! emits one record per successful completion. The wrapped operation's
//! outcome is passed through untouched.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use quotes_types::{LogSink, RequestLog};

/// Target used for request log lines.
pub const LOG_TARGET: &str = "LoggingInterceptor";

/// Explicit middleware of the shape `(request metadata, next) -> result`.
///
/// Each invocation captures its own start instant; nothing is shared between
/// concurrent requests except the sink.
#[derive(Clone)]
pub struct LoggingInterceptor {
    sink: Arc<dyn LogSink>,
}

impl LoggingInterceptor {
    /// Creates an interceptor reporting to the given sink.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Runs `next` and, if it succeeds, emits `{method} {url} - {elapsed}ms`.
    ///
    /// Errors from `next` are returned as they are and produce no record.
    pub async fn intercept<F, T, E>(&self, method: &str, url: &str, next: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        let output = next.await?;

        self.sink.emit(&RequestLog::new(method, url, started.elapsed()));

        Ok(output)
    }
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl std::fmt::Debug for LoggingInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingInterceptor").finish_non_exhaustive()
    }
}

/// Sink that writes each record through `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, record: &RequestLog) {
        tracing::info!(
            target: LOG_TARGET,
            method = %record.method,
            url = %record.url,
            elapsed_ms = record.elapsed_ms(),
            "{}",
            record
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    /// Writer that appends formatted output to a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn test_tracing_sink_writes_info_line() {
        let output = capture(|| {
            TracingSink.emit(&RequestLog::new("GET", "/quotes", Duration::from_millis(42)));
        });

        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("INFO"));
        assert!(output.contains("LoggingInterceptor:"));
        assert!(output.contains("GET /quotes - 42ms"));
        assert!(output.contains("method=GET"));
        assert!(output.contains("url=/quotes"));
        assert!(output.contains("elapsed_ms=42"));
    }

    #[tokio::test]
    async fn test_default_interceptor_logs_through_tracing() {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let result = LoggingInterceptor::default()
            .intercept("POST", "/quotes?draft=true", async { Ok::<_, ()>(7) })
            .await;

        assert_eq!(result, Ok(7));
        let output = buffer.contents();
        assert!(output.contains("LoggingInterceptor:"));
        assert!(output.contains("POST /quotes?draft=true - "));
    }
}
