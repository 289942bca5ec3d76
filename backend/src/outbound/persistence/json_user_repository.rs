//! User repository over the `users` collection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

use super::{Collection, JsonStore, StoreError};

/// [`UserRepository`] backed by [`JsonStore`].
#[derive(Clone)]
pub struct JsonUserRepository {
    store: Arc<JsonStore>,
}

impl JsonUserRepository {
    /// Create a repository sharing `store`.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

impl From<StoreError> for UserPersistenceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Read { .. } | StoreError::Corrupt { .. } | StoreError::Open { .. } => {
                Self::read(error.to_string())
            }
            StoreError::Write { .. } | StoreError::Task { .. } => Self::write(error.to_string()),
        }
    }
}

#[async_trait]
impl UserRepository for JsonUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.store.read(Collection::Users).await)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let users: Vec<User> = self.store.read(Collection::Users).await;
        Ok(users.into_iter().find(|user| user.username == username))
    }

    async fn insert_unique(&self, user: User) -> Result<(), UserPersistenceError> {
        self.store
            .modify(Collection::Users, move |users: &mut Vec<User>| {
                if users.iter().any(|existing| existing.username == user.username) {
                    return Err(UserPersistenceError::duplicate_username(user.username));
                }
                users.push(user);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
#[path = "json_user_repository_tests.rs"]
mod tests;
