//! Runtime configuration loaded from environment variables (and `.env`, if present).

use crate::error::ConfigError;
use std::collections::HashMap;
use std::env;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str = "access_control_api=info,tower_http=info";

/// Which gateway backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Required for the postgres backend.
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub bind_address: String,
    pub db_max_connections: u32,
    pub body_limit_bytes: usize,
    pub log_filter: String,
}

impl Config {
    /// Load `.env` (if any), then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|s| s.trim()).filter(|s| !s.is_empty());

        let store_backend = match get("STORE_BACKEND").map(str::to_ascii_lowercase).as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };
        let database_url = get("DATABASE_URL").map(String::from);
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Config {
            database_url,
            store_backend,
            bind_address: get("BIND_ADDRESS").unwrap_or(DEFAULT_BIND_ADDRESS).to_string(),
            db_max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            body_limit_bytes: parse_or(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", 1024 * 1024)?,
            log_filter: get("RUST_LOG").unwrap_or(DEFAULT_LOG_FILTER).to_string(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, name: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| ConfigError::Invalid {
            name,
            value: s.to_string(),
        }),
    }
}
