use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

pub const MEMORY_URI: &str = "memory://";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("{0} is neither set in the environment nor provided as a secret")]
    MissingSecret(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub notification_source: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("PORT", "5000")?,
            database_url: load_secret("MONGODB_URI")?,
            database_name: try_load("DATABASE_NAME", "fooddelivery")?,
            notification_source: try_load("NOTIFICATION_SOURCE", "nodejs_backend")?,
        })
    }

    /// Configuration backed by the in-process store, listening on `port`.
    pub fn in_memory(port: u16) -> Self {
        Self {
            port,
            database_url: MEMORY_URI.to_string(),
            database_name: "fooddelivery".to_string(),
            notification_source: "nodejs_backend".to_string(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    parse(key, var(key), default)
}

fn parse<T: FromStr>(key: &'static str, value: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");

            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

// Connection strings carry credentials, so they come from the environment or a mounted secret.
fn load_secret(secret_name: &'static str) -> Result<String, ConfigError> {
    if let Some(value) = var(secret_name) {
        return Ok(value);
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");

            ConfigError::MissingSecret(secret_name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default() {
        let port: u16 = parse("PORT", None, "5000").unwrap();
        assert_eq!(port, 5000);
    }

    #[test]
    fn prefers_provided_value() {
        let port: u16 = parse("PORT", Some("8080".to_string()), "5000").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn rejects_unparsable_value() {
        let result: Result<u16, _> = parse("PORT", Some("eighty".to_string()), "5000");

        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }
}
