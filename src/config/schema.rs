//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shortest signing key accepted for HS256
pub const MIN_SIGNING_KEY_LEN: usize = 32;

/// bcrypt cost bounds
pub const MIN_PASSWORD_COST: u32 = 4;
pub const MAX_PASSWORD_COST: u32 = 31;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Token and password settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric key used to sign session tokens. No default is provided.
    #[serde(default)]
    pub signing_key: String,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u32,

    /// bcrypt cost factor
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,

    /// Reject requests whose credential does not verify, instead of only
    /// checking that one is present
    #[serde(default)]
    pub verify_credentials: bool,
}

fn default_token_ttl_hours() -> u32 {
    24
}

fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            password_cost: default_password_cost(),
            verify_credentials: false,
        }
    }
}

impl AuthConfig {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.token_ttl_hours))
    }
}

impl Config {
    /// Check the settings the server cannot start without
    pub fn validate(&self) -> Result<()> {
        if self.auth.signing_key.trim().is_empty() {
            return Err(Error::Config(
                "auth.signing_key is not set (try signing_key = \"${CARDKEEP_SIGNING_KEY}\")"
                    .to_string(),
            ));
        }
        if self.auth.signing_key.len() < MIN_SIGNING_KEY_LEN {
            return Err(Error::Config(format!(
                "auth.signing_key must be at least {} bytes",
                MIN_SIGNING_KEY_LEN
            )));
        }
        if self.auth.token_ttl_hours == 0 {
            return Err(Error::Config(
                "auth.token_ttl_hours must be greater than zero".to_string(),
            ));
        }
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&self.auth.password_cost) {
            return Err(Error::Config(format!(
                "auth.password_cost must be between {} and {}",
                MIN_PASSWORD_COST,
                MAX_PASSWORD_COST
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> Config {
        let mut config = Config::default();
        config.auth.signing_key = key.to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert!(!config.auth.verify_credentials);
        assert_eq!(config.auth.token_ttl(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_missing_key_is_rejected() {
        assert!(matches!(Config::default().validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_short_key_is_rejected() {
        assert!(config_with_key("too-short").validate().is_err());
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = config_with_key("0123456789abcdef0123456789abcdef");
        config.auth.token_ttl_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_password_cost_bounds() {
        let mut config = config_with_key("0123456789abcdef0123456789abcdef");
        config.auth.password_cost = MIN_PASSWORD_COST - 1;
        assert!(config.validate().is_err());
        config.auth.password_cost = MAX_PASSWORD_COST + 1;
        assert!(config.validate().is_err());
        config.auth.password_cost = MIN_PASSWORD_COST;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_valid_config() {
        assert!(config_with_key("0123456789abcdef0123456789abcdef")
            .validate()
            .is_ok());
    }
}
