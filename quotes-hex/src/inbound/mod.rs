//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the interceptor.

mod handlers;
mod logging;
mod server;

pub use logging::logging_middleware;
pub use server::HttpServer;
