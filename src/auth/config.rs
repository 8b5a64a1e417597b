use crate::config::{parsed_or, required, ConfigError};

/// One day.
pub const DEFAULT_JWT_EXPIRY_SECS: u64 = 24 * 60 * 60;
/// Ten years.
pub const MAX_JWT_EXPIRY_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: String, expiry_secs: u64) -> Result<Self, ConfigError> {
        if expiry_secs == 0 || expiry_secs > MAX_JWT_EXPIRY_SECS {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_SECS",
                value: expiry_secs.to_string(),
            });
        }
        Ok(Self {
            secret,
            expiry_secs,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = required("JWT_SECRET")?;
        let expiry_secs = parsed_or("JWT_EXPIRATION_SECS", DEFAULT_JWT_EXPIRY_SECS)?;
        Self::new(secret, expiry_secs)
    }
}
