use dotenvy::var;
use thiserror::Error;

use crate::auth::JwtConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Reads `key`, failing when it is unset or empty.
pub(crate) fn required(key: &'static str) -> Result<String, ConfigError> {
    match var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

/// Parses `key` when present, otherwise returns `default`.
pub(crate) fn parsed_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: v }),
        Err(_) => Ok(default),
    }
}

/// Account created at startup when it does not exist yet.
#[derive(Clone, Debug)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub pool_size: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub admin: Option<AdminBootstrap>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let pool_size = parsed_or("DB_POOL_SIZE", 20u32)?;
        let host = var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parsed_or("SERVER_PORT", 8080u16)?;
        let jwt = JwtConfig::from_env()?;

        let admin = match (var("ADMIN_EMAIL"), var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminBootstrap {
                email,
                password,
                first_name: var("ADMIN_FIRST_NAME").unwrap_or_else(|_| "Admin".to_string()),
                last_name: var("ADMIN_LAST_NAME").unwrap_or_else(|_| "Admin".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            pool_size,
            host,
            port,
            jwt,
            admin,
        })
    }
}
