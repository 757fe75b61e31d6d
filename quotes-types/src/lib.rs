//! # Quotes Types
//!
//! Core types and port traits for the quote editor service.
//! This crate performs no IO apart from reading the process environment
//! through [`ProcessEnv`] - only data structures, derivation rules, and
//! trait definitions.
//!
//! ## Layout
//!
//! - `config/` - Configuration snapshot and its resolver
//! - `database/` - Connection options derived from the snapshot
//! - `request_log/` - The per-request log record
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Error types

pub mod config;
pub mod database;
pub mod error;
pub mod ports;
pub mod request_log;

// Re-export commonly used types
pub use config::{
    ConfigSource, Configuration, DatabaseConfig, Environment, PortSetting, ProcessEnv,
};
pub use database::ConnectionOptions;
pub use error::ConfigError;
pub use ports::LogSink;
pub use request_log::RequestLog;
