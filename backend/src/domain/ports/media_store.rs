//! Port for persisting and serving uploaded images.
use async_trait::async_trait;

use crate::domain::{ImageUpload, MediaPurpose};

use super::define_port_error;

define_port_error! {
    /// Errors raised by media store adapters.
    pub enum MediaStoreError {
        /// The file could not be written.
        Write { message: String } => "media write failed: {message}",
        /// The file exists but could not be read.
        Read { message: String } => "media read failed: {message}",
    }
}

/// Port for storing uploaded images under a generated unique name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist `upload` and return its public reference, for example
    /// `/uploads/incidents/<uuid>.jpg`.
    async fn store(
        &self,
        purpose: MediaPurpose,
        upload: &ImageUpload,
    ) -> Result<String, MediaStoreError>;

    /// Contents of a previously stored file, or `None` when `file_name` is
    /// unknown or not a name this store could have generated.
    async fn load(
        &self,
        purpose: MediaPurpose,
        file_name: &str,
    ) -> Result<Option<Vec<u8>>, MediaStoreError>;
}
