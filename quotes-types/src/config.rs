//! Configuration snapshot and its resolver.
//!
//! The resolver reads from an explicit [`ConfigSource`] rather than the
//! process environment directly, so the same rules apply to tests, the
//! server binary, and the CLI.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::database::ConnectionOptions;
use crate::error::ConfigError;

pub const NODE_ENV_VAR: &str = "NODE_ENV";
pub const PORT_VAR: &str = "PORT";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/quote-editor";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Sources
// ─────────────────────────────────────────────────────────────────────────────

/// A mapping of variable names to string values.
pub trait ConfigSource {
    /// Returns the raw value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigSource for HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).map(|v| v.to_string())
    }
}

/// Empty values count as unset.
fn lookup<S: ConfigSource + ?Sized>(source: &S, key: &str) -> Option<String> {
    source.get(key).filter(|value| !value.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment
// ─────────────────────────────────────────────────────────────────────────────

/// Deployment environment name.
///
/// The set is open: unrecognised names are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
    Other(String),
}

impl Environment {
    pub fn as_str(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
            Environment::Other(name) => name,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        match name {
            "development" => Environment::Development,
            "production" => Environment::Production,
            "test" => Environment::Test,
            other => Environment::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Port
// ─────────────────────────────────────────────────────────────────────────────

/// The listening port as resolved from configuration.
///
/// Malformed input does not fail resolution. It is kept as `Invalid`
/// together with the raw text so the caller decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSetting {
    Number(u16),
    Invalid(String),
}

impl PortSetting {
    /// Parses the leading base-10 integer of `raw`.
    ///
    /// Leading whitespace and one sign character are accepted, and anything
    /// after the leading digits is ignored, so `"8080abc"` is port 8080.
    /// Input with no leading digits, or a number outside `0..=65535`, is
    /// `Invalid`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        let digits = &unsigned[..digits_len];

        match digits.parse::<u16>() {
            Ok(port) if !negative || port == 0 => PortSetting::Number(port),
            _ => PortSetting::Invalid(raw.to_string()),
        }
    }

    /// Returns the port number, or `None` when the input was malformed.
    pub fn number(&self) -> Option<u16> {
        match self {
            PortSetting::Number(port) => Some(*port),
            PortSetting::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.number().is_some()
    }

    /// Returns the port number or fails with the offending raw value.
    pub fn require(&self) -> Result<u16, ConfigError> {
        match self {
            PortSetting::Number(port) => Ok(*port),
            PortSetting::Invalid(value) => Err(ConfigError::InvalidPort {
                value: value.clone(),
            }),
        }
    }
}

impl Default for PortSetting {
    fn default() -> Self {
        PortSetting::Number(DEFAULT_PORT)
    }
}

impl std::fmt::Display for PortSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortSetting::Number(port) => write!(f, "{}", port),
            PortSetting::Invalid(raw) => write!(f, "invalid ({:?})", raw),
        }
    }
}

/// Invalid ports serialize as `null`.
impl Serialize for PortSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PortSetting::Number(port) => serializer.serialize_u16(*port),
            PortSetting::Invalid(_) => serializer.serialize_none(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Database section of the configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Process configuration, resolved once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub node_env: Environment,
    pub port: PortSetting,
    pub database: DatabaseConfig,
}

impl Configuration {
    /// Resolves the snapshot from `source`, falling back to the defaults for
    /// every variable that is unset or empty.
    ///
    /// | Field          | Variable       | Fallback                                   |
    /// |----------------|----------------|--------------------------------------------|
    /// | `node_env`     | `NODE_ENV`     | `development`                              |
    /// | `port`         | `PORT`         | `3000`                                     |
    /// | `database.url` | `DATABASE_URL` | `mongodb://localhost:27017/quote-editor`   |
    pub fn resolve<S: ConfigSource + ?Sized>(source: &S) -> Self {
        let node_env = lookup(source, NODE_ENV_VAR)
            .map(|name| Environment::from(name.as_str()))
            .unwrap_or_default();

        let port = lookup(source, PORT_VAR)
            .map(|raw| PortSetting::parse(&raw))
            .unwrap_or_default();

        let database = lookup(source, DATABASE_URL_VAR)
            .map(|url| DatabaseConfig { url })
            .unwrap_or_default();

        Self {
            node_env,
            port,
            database,
        }
    }

    /// Resolves the snapshot from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(&ProcessEnv)
    }

    /// Derives the database driver options for this snapshot.
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions::from_url(&self.database.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_resolve_defaults_when_unset() {
        let config = Configuration::resolve(&source(&[]));

        assert_eq!(config.node_env, Environment::Development);
        assert_eq!(config.port, PortSetting::Number(3000));
        assert_eq!(
            config.database.url,
            "mongodb://localhost:27017/quote-editor"
        );
    }

    #[test]
    fn test_default_snapshot_shape() {
        let config = Configuration::resolve(&source(&[]));

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "nodeEnv": "development",
                "port": 3000,
                "database": { "url": "mongodb://localhost:27017/quote-editor" }
            })
        );
    }

    #[test]
    fn test_resolve_port_from_source() {
        let config = Configuration::resolve(&source(&[("PORT", "8080")]));
        assert_eq!(config.port.number(), Some(8080));
    }

    #[test]
    fn test_resolve_malformed_port_is_invalid() {
        let config = Configuration::resolve(&source(&[("PORT", "abc")]));

        assert!(!config.port.is_valid());
        assert_eq!(config.port, PortSetting::Invalid("abc".into()));
        assert_eq!(serde_json::to_value(&config).unwrap()["port"], json!(null));
    }

    #[test]
    fn test_port_reads_leading_digits() {
        assert_eq!(PortSetting::parse("8080abc"), PortSetting::Number(8080));
        assert_eq!(PortSetting::parse("3000.5"), PortSetting::Number(3000));
        assert_eq!(PortSetting::parse("80a"), PortSetting::Number(80));
        assert_eq!(PortSetting::parse("  4000 "), PortSetting::Number(4000));
        assert_eq!(PortSetting::parse("+81"), PortSetting::Number(81));
        assert_eq!(PortSetting::parse("-0"), PortSetting::Number(0));
    }

    #[test]
    fn test_resolve_port_with_trailing_garbage() {
        let config = Configuration::resolve(&source(&[("PORT", "8080abc")]));
        assert_eq!(config.port.number(), Some(8080));
    }

    #[test]
    fn test_port_without_leading_digits_is_invalid() {
        assert!(!PortSetting::parse("a80").is_valid());
        assert!(!PortSetting::parse("-").is_valid());
        assert!(!PortSetting::parse(".5").is_valid());
        assert!(!PortSetting::parse("- 80").is_valid());
    }

    #[test]
    fn test_port_out_of_range_is_invalid() {
        assert!(!PortSetting::parse("70000").is_valid());
        assert!(!PortSetting::parse("-1").is_valid());
        assert!(!PortSetting::parse("99999999999999999999").is_valid());
    }

    #[test]
    fn test_require_port_reports_raw_value() {
        let err = PortSetting::parse("x80").require().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                value: "x80".into()
            }
        );
        assert_eq!(PortSetting::Number(3000).require(), Ok(3000));
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = Configuration::resolve(&source(&[
            ("NODE_ENV", ""),
            ("PORT", ""),
            ("DATABASE_URL", ""),
        ]));

        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_resolve_all_overrides() {
        let mut vars = HashMap::new();
        vars.insert("NODE_ENV".to_string(), "production".to_string());
        vars.insert("PORT".to_string(), "443".to_string());
        vars.insert(
            "DATABASE_URL".to_string(),
            "mongodb://db.internal:27017/quotes".to_string(),
        );

        let config = Configuration::resolve(&vars);

        assert!(config.node_env.is_production());
        assert_eq!(config.port.number(), Some(443));
        assert_eq!(config.database.url, "mongodb://db.internal:27017/quotes");
    }

    #[test]
    fn test_unknown_environment_kept_verbatim() {
        let config = Configuration::resolve(&source(&[("NODE_ENV", "staging")]));

        assert_eq!(config.node_env, Environment::Other("staging".into()));
        assert_eq!(config.node_env.to_string(), "staging");
        assert!(!config.node_env.is_production());
    }

    #[test]
    fn test_connection_options_follow_database_url() {
        let config = Configuration::resolve(&source(&[(
            "DATABASE_URL",
            "mongodb://replica:27017/quotes",
        )]));

        assert_eq!(
            config.connection_options().uri,
            "mongodb://replica:27017/quotes"
        );
    }
}
