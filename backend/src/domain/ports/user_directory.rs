//! Driving port for administrative user management.

use async_trait::async_trait;

use crate::domain::{Error, ImageUpload, NewUser, UserSummary};

/// Photos optionally supplied with a new user.
#[derive(Debug, Clone, Default)]
pub struct UserPhotos {
    pub profile: Option<ImageUpload>,
    pub registration: Option<ImageUpload>,
}

/// Domain use-case port for the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create a user, failing with a conflict when the username is taken.
    async fn create_user(&self, user: NewUser, photos: UserPhotos) -> Result<UserSummary, Error>;

    /// All users in store order, without password hashes.
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error>;
}
