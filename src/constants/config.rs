use std::env;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_JWT_EXPIRE_HOURS: i64 = 24;
const DEFAULT_COOKIE_EXPIRE_DAYS: i64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

pub fn get_database_url() -> Result<String, env::VarError> {
    env::var("DATABASE_URL")
}

pub fn get_server_address() -> String {
    env::var("SERVER_ADDRESS")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

pub fn get_cors_origins() -> Vec<String> {
    env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings for token issuance, the auth cookie and password hashing.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expire_hours: i64,
    pub cookie_expire_days: i64,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so callers other than
    /// the process environment (tests, embedded setups) can supply values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expire_hours = parse_or(&lookup, "JWT_EXPIRE_HOURS", DEFAULT_JWT_EXPIRE_HOURS)?;
        if jwt_expire_hours <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRE_HOURS",
                value: jwt_expire_hours.to_string(),
            });
        }

        let cookie_expire_days =
            parse_or(&lookup, "JWT_COOKIE_EXPIRE_DAYS", DEFAULT_COOKIE_EXPIRE_DAYS)?;
        if cookie_expire_days <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_COOKIE_EXPIRE_DAYS",
                value: cookie_expire_days.to_string(),
            });
        }

        let cookie_secure = parse_or(&lookup, "COOKIE_SECURE", false)?;

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            jwt_secret,
            jwt_expire_hours,
            cookie_expire_days,
            cookie_secure,
            bcrypt_cost,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = AuthConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.jwt_expire_hours, 24);
        assert_eq!(config.cookie_expire_days, 30);
        assert!(!config.cookie_secure);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn missing_or_blank_secret_is_rejected() {
        assert_eq!(
            AuthConfig::from_lookup(lookup_from(&[])).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
        assert_eq!(
            AuthConfig::from_lookup(lookup_from(&[("JWT_SECRET", "  ")])).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRE_HOURS", "2"),
            ("JWT_COOKIE_EXPIRE_DAYS", "7"),
            ("COOKIE_SECURE", "true"),
            ("BCRYPT_COST", "4"),
        ]))
        .unwrap();

        assert_eq!(config.jwt_expire_hours, 2);
        assert_eq!(config.cookie_expire_days, 7);
        assert!(config.cookie_secure);
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn invalid_values_name_the_offending_key() {
        let err = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRE_HOURS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "JWT_EXPIRE_HOURS",
                value: "soon".to_string()
            }
        );

        let err = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("BCRYPT_COST", "2"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BCRYPT_COST", .. }));
    }
}
