//! Port for salted one-way password hashing.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hasher adapters.
    pub enum PasswordHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
