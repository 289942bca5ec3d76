//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The stored collection could not be read or parsed.
        Read { message: String } => "user store read failed: {message}",
        /// The collection could not be written back.
        Write { message: String } => "user store write failed: {message}",
        /// Another record already holds the username.
        DuplicateUsername { username: String } => "username {username} already exists",
    }
}

/// Port for the user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in store order. Unreadable storage yields an empty list.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Exact, case-sensitive username lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Append `user` unless its username is taken.
    ///
    /// The uniqueness check and the append happen under one writer lock, so
    /// of two concurrent inserts with the same username exactly one succeeds
    /// and the other returns [`UserPersistenceError::DuplicateUsername`].
    async fn insert_unique(&self, user: User) -> Result<(), UserPersistenceError>;
}
