//! Error types for the quote editor service.

/// Configuration errors raised when a resolved value is put to use.
///
/// Resolution itself never fails; these surface when the bootstrap
/// requires a value to be well-formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value {value:?}: expected an integer between 0 and 65535")]
    InvalidPort { value: String },
}
