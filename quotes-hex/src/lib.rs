//! # Quotes Hex
//!
//! Request logging interceptor and HTTP adapter for the quote editor service.
//!
//! ## Architecture
//!
//! - `interceptor/` - Times a request-handling operation and reports it to a sink
//! - `inbound/` - HTTP adapter (Axum server) that composes the interceptor
//!   into the request chain
//!
//! The interceptor depends only on the `LogSink` port, allowing different
//! sinks to be injected.

pub mod inbound;
pub mod interceptor;


pub use interceptor::{LoggingInterceptor, TracingSink};
