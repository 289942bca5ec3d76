//! Port for the server-side session table.
use async_trait::async_trait;

use crate::domain::{SessionSnapshot, SessionToken};

/// Port for storing session snapshots keyed by an opaque token.
///
/// Implementations own expiry: [`SessionRegistry::resolve`] must not return
/// a snapshot whose lifetime has elapsed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Store `snapshot` and return a fresh unguessable token.
    async fn create(&self, snapshot: SessionSnapshot) -> SessionToken;

    /// Snapshot for a live token.
    async fn resolve(&self, token: &SessionToken) -> Option<SessionSnapshot>;

    /// Forget `token`. Unknown tokens are ignored.
    async fn revoke(&self, token: &SessionToken);
}
