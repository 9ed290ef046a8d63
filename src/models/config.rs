//! Runtime settings for the hoots service.

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while assembling [`ServerConfig`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("jwt.secret must be set (JWT_SECRET)")]
    MissingSecret,
}

/// Token verification settings shared with the identity service.
#[derive(Clone, Debug, Deserialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign bearer tokens.
    pub secret: String,
    /// Reject tokens that carry no `exp` claim.
    #[serde(default)]
    pub require_expiry: bool,
}

/// Configuration options specific to the hoots service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the SQLite database file.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    pub jwt: JwtConfig,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "app.db".to_string()
}

impl ServerConfig {
    /// Load settings from `config/default.yaml`, `config/{APP_ENV}.yaml` and
    /// the environment, in increasing order of precedence.
    ///
    /// `APP__PORT=8080` style variables override file values; the plain
    /// `JWT_SECRET` and `DATABASE_URL` variables win over everything.
    pub fn load() -> Result<Self, SettingsError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database_url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validated()
    }

    fn validated(self) -> Result<Self, SettingsError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(SettingsError::MissingSecret);
        }
        Ok(self)
    }
}
