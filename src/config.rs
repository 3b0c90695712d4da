use std::env;

use thiserror::Error;

use crate::auth::password::{MAX_COST, MIN_COST};

const DEFAULT_CORS_ORIGIN: &str = "http://127.0.0.1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Process configuration, read from the environment.
///
/// | Variable | Default |
/// |---|---|
/// | `JWT_SECRET` | required |
/// | `DATABASE_URL` | unset: in-memory stores |
/// | `SERVER_HOST` | `127.0.0.1` |
/// | `SERVER_PORT` | `8080` |
/// | `BCRYPT_COST` | `bcrypt::DEFAULT_COST` |
/// | `CORS_ALLOWED_ORIGINS` | `http://127.0.0.1` (comma-separated; `*` allows any) |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                reason: format!("{:?} is not a port number", raw),
            })?,
            None => 8080,
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => {
                let cost: u32 = raw.parse().map_err(|_| ConfigError::Invalid {
                    key: "BCRYPT_COST",
                    reason: format!("{:?} is not a number", raw),
                })?;
                if !(MIN_COST..=MAX_COST).contains(&cost) {
                    return Err(ConfigError::Invalid {
                        key: "BCRYPT_COST",
                        reason: format!(
                            "must be between {} and {}",
                            MIN_COST,
                            MAX_COST
                        ),
                    });
                }
                cost
            }
            None => bcrypt::DEFAULT_COST,
        };

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            None => vec![DEFAULT_CORS_ORIGIN.to_string()],
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            server_port,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            bcrypt_cost,
            cors_allowed_origins,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
