//! Process configuration, read from environment variables (and `.env`, loaded by `main`).

use crate::auth::JwtConfig;
use crate::proximity::SearchLimits;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::info;

const MIN_SECRET_LEN: usize = 16;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub search: SearchLimits,
    pub request_timeout: Duration,
    pub actor_buffer_size: usize,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                value: "<redacted>".into(),
                reason: format!("must be at least {MIN_SECRET_LEN} characters"),
            });
        }

        let expiration_minutes: i64 = try_load(&get, "JWT_EXPIRATION_MINUTES", "60")?;
        let default_radius: f64 = try_load(&get, "DEFAULT_SEARCH_RADIUS_METERS", "5000")?;
        let max_radius: f64 = try_load(&get, "MAX_SEARCH_RADIUS_METERS", "50000")?;
        let timeout_secs: u64 = try_load(&get, "REQUEST_TIMEOUT_SECS", "10")?;
        let actor_buffer_size: usize = try_load(&get, "ACTOR_BUFFER_SIZE", "64")?;

        positive("JWT_EXPIRATION_MINUTES", expiration_minutes as f64)?;
        positive("MAX_SEARCH_RADIUS_METERS", max_radius)?;
        positive("REQUEST_TIMEOUT_SECS", timeout_secs as f64)?;
        positive("ACTOR_BUFFER_SIZE", actor_buffer_size as f64)?;
        if !(0.0..=max_radius).contains(&default_radius) {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_SEARCH_RADIUS_METERS",
                value: default_radius.to_string(),
                reason: format!("must be between 0 and {max_radius}"),
            });
        }

        Ok(Self {
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: try_load(&get, "PORT", "5000")?,
            jwt: JwtConfig {
                secret,
                expiration_minutes,
                issuer: get("JWT_ISSUER").unwrap_or_else(|| "dokan".to_string()),
            },
            search: SearchLimits {
                default_radius_meters: default_radius,
                max_radius_meters: max_radius,
            },
            request_timeout: Duration::from_secs(timeout_secs),
            actor_buffer_size,
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn try_load<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = get(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be greater than zero".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("JWT_SECRET", "a-long-enough-secret")]).unwrap();
        assert_eq!(config.listen_address(), "0.0.0.0:5000");
        assert_eq!(config.jwt.expiration_minutes, 60);
        assert_eq!(config.jwt.issuer, "dokan");
        assert_eq!(config.search.default_radius_meters, 5000.0);
        assert_eq!(config.search.max_radius_meters, 50000.0);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.actor_buffer_size, 64);
        assert!(config.cors_allowed_origin.is_none());
    }

    #[test]
    fn test_secret_required_and_long_enough() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("JWT_SECRET"));
        assert!(matches!(
            load(&[("JWT_SECRET", "short")]),
            Err(ConfigError::Invalid { key: "JWT_SECRET", .. })
        ));
    }

    #[test]
    fn test_invalid_values_name_the_key() {
        let err = load(&[("JWT_SECRET", "a-long-enough-secret"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = load(&[
            ("JWT_SECRET", "a-long-enough-secret"),
            ("DEFAULT_SEARCH_RADIUS_METERS", "90000"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DEFAULT_SEARCH_RADIUS_METERS", .. }));

        let err = load(&[("JWT_SECRET", "a-long-enough-secret"), ("ACTOR_BUFFER_SIZE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ACTOR_BUFFER_SIZE", .. }));
    }
}
