//! Identity service: credential checks and the session lifecycle.
//!
//! Authentication matches the username exactly and additionally requires the
//! user type chosen on the login form to equal the stored one. Unknown users
//! still cost one hash verification against a lazily computed dummy hash so
//! response timing does not reveal which usernames exist.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, SessionManager, SessionRegistry,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, SessionSnapshot, SessionToken, User, UserType};

const DUMMY_PASSWORD: &str = "campus-security-timing-equaliser";

/// Identity service implementing [`LoginService`] and [`SessionManager`].
pub struct IdentityService<U, H, S> {
    users: Arc<U>,
    hasher: Arc<H>,
    sessions: Arc<S>,
    dummy_hash: OnceCell<String>,
}

impl<U, H, S> IdentityService<U, H, S> {
    /// Create a service over the user store, hasher, and session table.
    pub fn new(users: Arc<U>, hasher: Arc<H>, sessions: Arc<S>) -> Self {
        Self {
            users,
            hasher,
            sessions,
            dummy_hash: OnceCell::new(),
        }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn map_user_error(error: UserPersistenceError) -> Error {
    Error::internal(format!("user repository error: {error}"))
}

impl<U, H, S> IdentityService<U, H, S>
where
    U: UserRepository,
    H: PasswordHasher,
    S: SessionRegistry,
{
    async fn equalise_timing(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
            .await;
        match dummy {
            Ok(hash) => {
                drop(self.hasher.verify(password, hash).await);
            }
            Err(err) => debug!(error = %err, "dummy hash unavailable"),
        }
    }

    async fn verify_stored(&self, user: &User, password: &str) -> Result<bool, Error> {
        match self.hasher.verify(password, &user.password_hash).await {
            Ok(matches) => Ok(matches),
            Err(PasswordHashError::MalformedHash { message }) => {
                warn!(username = %user.username, %message, "stored password hash is unreadable");
                Ok(false)
            }
            Err(err @ PasswordHashError::Hash { .. }) => {
                Err(Error::internal(format!("password verification failed: {err}")))
            }
        }
    }
}

#[async_trait]
impl<U, H, S> LoginService for IdentityService<U, H, S>
where
    U: UserRepository,
    H: PasswordHasher,
    S: SessionRegistry,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let requested_type = credentials.user_type().parse::<UserType>().ok();
        let candidate = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
            .filter(|user| Some(user.user_type) == requested_type);

        let Some(user) = candidate else {
            self.equalise_timing(credentials.password()).await;
            debug!(username = %credentials.username(), "login rejected: no matching user");
            return Err(invalid_credentials());
        };

        if self.verify_stored(&user, credentials.password()).await? {
            Ok(user)
        } else {
            debug!(username = %user.username, "login rejected: password mismatch");
            Err(invalid_credentials())
        }
    }
}

#[async_trait]
impl<U, H, S> SessionManager for IdentityService<U, H, S>
where
    U: UserRepository,
    H: PasswordHasher,
    S: SessionRegistry,
{
    async fn establish(&self, user: &User) -> Result<SessionToken, Error> {
        let token = self.sessions.create(SessionSnapshot::from(user)).await;
        info!(user_id = %user.id, username = %user.username, "session established");
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<SessionSnapshot>, Error> {
        Ok(self.sessions.resolve(token).await)
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), Error> {
        self.sessions.revoke(token).await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
