//! Argon2id password hashing on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] producing PHC-format Argon2id strings.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::with_params(Params::default())
    }
}

impl Argon2PasswordHasher {
    /// Hasher using explicit cost parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Cheapest parameters Argon2 accepts. Only suitable for tests.
    #[must_use]
    pub fn minimal() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .unwrap_or_default();
        Self::with_params(params)
    }
}

fn hash_blocking(argon2: &Argon2<'_>, password: &[u8]) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2::PasswordHasher::hash_password(argon2, password, &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(
    argon2: &Argon2<'_>,
    password: &[u8],
    stored: &str,
) -> Result<bool, PasswordHashError> {
    let parsed =
        PasswordHash::new(stored).map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
    match argon2.verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let stored = hash.to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&argon2, &password, &stored))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::minimal()
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted_phc_strings(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("admin123").await.expect("hash");
        let second = hasher.hash("admin123").await.expect("hash");
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("admin123", true)]
    #[case("Admin123", false)]
    #[case("", false)]
    #[tokio::test]
    async fn verification_checks_the_password(
        hasher: Argon2PasswordHasher,
        #[case] attempt: &str,
        #[case] expected: bool,
    ) {
        let stored = hasher.hash("admin123").await.expect("hash");
        assert_eq!(hasher.verify(attempt, &stored).await.expect("verify"), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn garbage_hash_is_reported_as_malformed(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("admin123", "plaintext-from-an-old-file")
            .await
            .expect_err("must fail");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
