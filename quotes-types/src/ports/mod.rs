//! Port traits (interfaces for adapters).
//!
//! The interceptor depends on these traits, not on concrete sinks.

mod log_sink;

pub use log_sink::LogSink;
