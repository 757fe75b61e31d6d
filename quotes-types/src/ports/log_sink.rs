//! Logging sink port.

use crate::request_log::RequestLog;

/// Destination for request log records.
///
/// Format and destination are the sink's concern. Implementations must be
/// cheap to call: the interceptor invokes `emit` inline on the request path.
pub trait LogSink: Send + Sync + 'static {
    fn emit(&self, record: &RequestLog);
}
