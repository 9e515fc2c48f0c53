use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

use crate::config::{defaults, Config, PasswordSource};
use crate::error::AuthError;

/// The one authorized identity
#[derive(Clone)]
pub struct Credential {
    username: String,
    /// argon2 PHC string
    password_hash: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credential {
    /// Hash `password` with a fresh random salt
    pub fn from_plaintext(username: impl Into<String>, password: &str) -> Result<Self, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .to_string();

        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }

    /// Use an existing PHC hash string, rejecting it if it does not parse
    pub fn from_hash(username: impl Into<String>, password_hash: impl Into<String>) -> Result<Self, AuthError> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash).map_err(|e| AuthError::MalformedHash(e.to_string()))?;

        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }

    /// Build the credential described by the configuration
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        match &config.password {
            PasswordSource::Hash(hash) => Self::from_hash(config.username.clone(), hash.clone()),
            PasswordSource::Plaintext(password) => {
                Self::from_plaintext(config.username.clone(), password)
            }
            PasswordSource::Default => {
                log::warn!(
                    "[AUTH] No password configured, using the built-in default. Set NOTES_PASSWORD_HASH for real deployments."
                );
                Self::from_plaintext(config.username.clone(), defaults::PASSWORD)
            }
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Check a username/password pair. The hash is verified even when the
    /// username is wrong so both failures take the same time.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let username_ok = username == self.username;

        let password_ok = match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                log::error!("[AUTH] Stored password hash is unusable: {}", e);
                false
            }
        };

        username_ok && password_ok
    }
}
