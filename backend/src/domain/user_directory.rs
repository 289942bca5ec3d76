//! User directory service for administrators.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    MediaStore, MediaStoreError, PasswordHasher, UserDirectory, UserPersistenceError,
    UserPhotos, UserRepository,
};
use crate::domain::{Error, ImageUpload, MediaPurpose, NewUser, StoredPhotos, UserId, UserSummary};

/// User directory service implementing [`UserDirectory`].
#[derive(Clone)]
pub struct UserDirectoryService<U, H, M> {
    users: Arc<U>,
    hasher: Arc<H>,
    media: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<U, H, M> UserDirectoryService<U, H, M> {
    /// Create a service over the user store, hasher, and media store.
    pub fn new(users: Arc<U>, hasher: Arc<H>, media: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            media,
            clock,
        }
    }
}

fn username_taken() -> Error {
    Error::conflict("username already exists")
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { .. } => username_taken(),
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_media_error(error: MediaStoreError) -> Error {
    Error::internal(format!("media store error: {error}"))
}

impl<U, H, M> UserDirectoryService<U, H, M>
where
    U: UserRepository,
    H: PasswordHasher,
    M: MediaStore,
{
    async fn store_photo(&self, upload: Option<ImageUpload>) -> Result<Option<String>, Error> {
        match upload {
            Some(upload) => self
                .media
                .store(MediaPurpose::Profile, &upload)
                .await
                .map(Some)
                .map_err(map_media_error),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<U, H, M> UserDirectory for UserDirectoryService<U, H, M>
where
    U: UserRepository,
    H: PasswordHasher,
    M: MediaStore,
{
    async fn create_user(&self, user: NewUser, photos: UserPhotos) -> Result<UserSummary, Error> {
        // Cheap early rejection; the authoritative check runs inside the
        // store's writer lock.
        if self
            .users
            .find_by_username(user.username())
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(username_taken());
        }

        let password_hash = self
            .hasher
            .hash(user.password())
            .await
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;
        let stored_photos = StoredPhotos {
            profile: self.store_photo(photos.profile).await?,
            registration: self.store_photo(photos.registration).await?,
        };

        let record = user.into_user(
            UserId::random(),
            password_hash,
            stored_photos,
            self.clock.utc(),
        );
        let summary = UserSummary::from(&record);
        self.users
            .insert_unique(record)
            .await
            .map_err(map_user_error)?;

        info!(
            user_id = %summary.id,
            username = %summary.username,
            user_type = summary.user_type.as_str(),
            "user created"
        );
        Ok(summary)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, Error> {
        let users = self.users.list().await.map_err(map_user_error)?;
        Ok(users.iter().map(UserSummary::from).collect())
    }
}

#[cfg(test)]
#[path = "user_directory_tests.rs"]
mod tests;
