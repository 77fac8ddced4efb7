//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use super::{error, info, success, warn};
use crate::auth::{PasswordHasher, TokenService};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::error::Result;

fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    }
}

/// Initialize a new configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Set CARDKEEP_SIGNING_KEY (at least 32 bytes) and run 'cardkeep serve'");

    Ok(())
}

/// Start the API server
pub async fn serve(config_path: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load(config_path.as_deref())?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server at http://{}:{}", host, port));

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Hash a password with the configured bcrypt cost
pub async fn hash_password(config_path: Option<PathBuf>, password: &str) -> Result<()> {
    let cost = match load(config_path.as_deref()) {
        Ok(config) => config.auth.password_cost,
        Err(_) => bcrypt::DEFAULT_COST,
    };

    let hash = PasswordHasher::new(cost).hash(password)?;
    println!("{}", hash);
    Ok(())
}

/// Report whether a token verifies with the configured key
pub async fn verify_token(config_path: Option<PathBuf>, token: &str) -> Result<()> {
    let config = load(config_path.as_deref())?;
    config.validate()?;

    let tokens = TokenService::new(config.auth.signing_key.as_bytes(), config.auth.token_ttl());
    match tokens.decode(token.strip_prefix("Bearer ").unwrap_or(token)) {
        Ok(claims) => {
            let expires = chrono::DateTime::from_timestamp(claims.exp, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| claims.exp.to_string());
            success(&format!("Token is valid for '{}' until {}", claims.sub, expires));
        }
        Err(e) => error(&format!("Token is not valid: {}", e)),
    }
    Ok(())
}
