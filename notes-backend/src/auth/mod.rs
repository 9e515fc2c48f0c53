//! Single-account authentication
//!
//! One credential is configured at startup. Passwords are only ever checked
//! through argon2 verification against its stored hash.

pub mod authenticator;
pub mod credential;

pub use authenticator::Authenticator;
pub use credential::Credential;
