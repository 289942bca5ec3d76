//! Driving ports for login and session use-cases.
//!
//! Inbound adapters call these to authenticate credentials and to turn a
//! cookie token back into an identity, without importing the hasher or the
//! session table.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SessionSnapshot, SessionToken, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching user.
    ///
    /// Every failure to match (unknown user, wrong user type, wrong password)
    /// is reported as [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Domain use-case port for session lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Snapshot `user` into a new server-side session.
    async fn establish(&self, user: &User) -> Result<SessionToken, Error>;

    /// Identity behind a token, if the session is still live.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<SessionSnapshot>, Error>;

    /// End the session behind `token`.
    async fn destroy(&self, token: &SessionToken) -> Result<(), Error>;
}
