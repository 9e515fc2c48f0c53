use chrono::Duration;
use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    /// Path of the JSON file holding every note.
    pub const NOTES_FILE: &str = "NOTES_FILE";
    pub const NOTES_USERNAME: &str = "NOTES_USERNAME";
    /// Argon2 PHC string for the account password. Takes precedence over NOTES_PASSWORD.
    pub const NOTES_PASSWORD_HASH: &str = "NOTES_PASSWORD_HASH";
    /// Plaintext password, hashed once at startup when no hash is configured.
    pub const NOTES_PASSWORD: &str = "NOTES_PASSWORD";
    pub const SESSION_TTL_HOURS: &str = "SESSION_TTL_HOURS";
    /// Set to "true" or "1" when served over HTTPS so the session cookie is marked Secure.
    pub const SESSION_COOKIE_SECURE: &str = "SESSION_COOKIE_SECURE";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 8080;
    pub const DATA_DIR: &str = "data";
    pub const NOTES_FILE_NAME: &str = "notes_data.json";
    pub const USERNAME: &str = "izuko";
    pub const PASSWORD: &str = "izuko12345";
    pub const SESSION_TTL_HOURS: i64 = 24;
    /// Longest accepted idle TTL (one year)
    pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;
}

/// Returns the absolute path to the notes-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// to notes-backend/ regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Default location of the notes file
pub fn default_notes_file() -> PathBuf {
    backend_dir()
        .join(defaults::DATA_DIR)
        .join(defaults::NOTES_FILE_NAME)
}

/// Where the account password comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PasswordSource {
    /// Pre-hashed argon2 PHC string
    Hash(String),
    /// Plaintext supplied through the environment
    Plaintext(String),
    /// Nothing configured; the built-in development password is used
    Default,
}

impl PasswordSource {
    pub fn describe(&self) -> &'static str {
        match self {
            PasswordSource::Hash(_) => "hash",
            PasswordSource::Plaintext(_) => "plaintext",
            PasswordSource::Default => "default",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub notes_file: PathBuf,
    pub username: String,
    pub password: PasswordSource,
    pub session_ttl_hours: i64,
    pub secure_cookies: bool,
}

impl Config {
    /// Idle lifetime of a browser session
    pub fn session_ttl(&self) -> Duration {
        Duration::try_hours(self.session_ttl_hours)
            .unwrap_or_else(|| Duration::hours(defaults::SESSION_TTL_HOURS))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup (the process
    /// environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match non_empty(env_vars::PORT) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                name: env_vars::PORT,
                value,
            })?,
            None => defaults::PORT,
        };

        let session_ttl_hours = match non_empty(env_vars::SESSION_TTL_HOURS) {
            Some(value) => match value.trim().parse::<i64>() {
                Ok(hours) if (1..=defaults::MAX_SESSION_TTL_HOURS).contains(&hours) => hours,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: env_vars::SESSION_TTL_HOURS,
                        value,
                    });
                }
            },
            None => defaults::SESSION_TTL_HOURS,
        };

        let username = match lookup(env_vars::NOTES_USERNAME) {
            Some(name) if name.trim().is_empty() => {
                return Err(ConfigError::Empty {
                    name: env_vars::NOTES_USERNAME,
                });
            }
            Some(name) => name,
            None => defaults::USERNAME.to_string(),
        };

        let password = if let Some(hash) = non_empty(env_vars::NOTES_PASSWORD_HASH) {
            PasswordSource::Hash(hash.trim().to_string())
        } else if let Some(plain) = non_empty(env_vars::NOTES_PASSWORD) {
            PasswordSource::Plaintext(plain)
        } else {
            PasswordSource::Default
        };

        let secure_cookies = non_empty(env_vars::SESSION_COOKIE_SECURE)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        Ok(Self {
            host: non_empty(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string()),
            port,
            notes_file: non_empty(env_vars::NOTES_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(default_notes_file),
            username,
            password,
            session_ttl_hours,
            secure_cookies,
        })
    }
}
