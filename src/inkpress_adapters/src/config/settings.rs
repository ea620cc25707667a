use std::path::PathBuf;

use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;

use crate::auth_tokens::{TokenConfig, TokenError};

/// Process-wide immutable configuration, read once at startup and injected
/// into components.
///
/// Values come from the environment (and an optional `.env` file), prefix
/// `INKPRESS`, with `__` separating nesting levels, e.g.
/// `INKPRESS_DATABASE__URL`, `INKPRESS_AUTH__ACCESS_SECRET`,
/// `INKPRESS_MEDIA__MAX_FILE_SIZE`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub media: MediaSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Comma-separated list of allowed CORS origins; unset means no CORS
    /// layer.
    pub allowed_origins: Option<String>,
}

impl ApplicationSettings {
    pub fn allowed_origins(&self) -> Option<AllowedOrigins> {
        self.allowed_origins
            .as_deref()
            .map(AllowedOrigins::from_comma_separated)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub access_secret: Secret<String>,
    pub refresh_secret: Secret<String>,
    pub algorithm: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

impl AuthSettings {
    pub fn token_config(&self) -> Result<TokenConfig, TokenError> {
        TokenConfig::new(
            self.access_secret.clone(),
            self.refresh_secret.clone(),
            &self.algorithm,
            self.access_ttl_minutes,
            self.refresh_ttl_minutes,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    pub root: PathBuf,
    pub public_url: String,
    pub max_file_size: u64,
}

impl Settings {
    pub fn load() -> Result<Settings, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8000)?
            .set_default("database.max_connections", 5)?
            .set_default("auth.algorithm", "HS256")?
            .set_default("auth.access_ttl_minutes", 30)?
            .set_default("auth.refresh_ttl_minutes", 60 * 24 * 7)?
            .set_default("media.root", "media")?
            .set_default("media.public_url", "/media")?
            .set_default("media.max_file_size", 5 * 1024 * 1024)?
            .add_source(
                config::Environment::with_prefix("INKPRESS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

/// CORS origin allow-list.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn from_comma_separated(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }
}
