//! Stores uploads as `<upload_root>/<purpose>/<uuid>.<ext>`.
//!
//! Stored references use the public prefix `/uploads`, so a profile photo
//! lands at `<upload_root>/profiles/<uuid>.png` and is referenced as
//! `/uploads/profiles/<uuid>.png`. Orphaned files left by failed requests are
//! not collected.

use std::io::{self, Write};
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{MediaStore, MediaStoreError};
use crate::domain::{ImageExtension, ImageUpload, MediaPurpose};

/// URL path prefix of stored references.
pub const PUBLIC_UPLOAD_PREFIX: &str = "/uploads";

/// Raised when the upload root cannot be prepared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to prepare upload directory '{path}': {message}")]
pub struct MediaStoreOpenError {
    /// Directory that could not be prepared.
    pub path: Utf8PathBuf,
    /// Description of the I/O error.
    pub message: String,
}

/// [`MediaStore`] writing into a capability-scoped upload directory.
#[derive(Clone)]
pub struct FsMediaStore {
    root: Arc<Dir>,
}

impl FsMediaStore {
    /// Open `root`, creating it and one subdirectory per purpose.
    ///
    /// # Errors
    /// Returns [`MediaStoreOpenError`] when a directory cannot be created.
    pub fn open(root: &Utf8Path) -> Result<Self, MediaStoreOpenError> {
        let open_error = |err: io::Error| MediaStoreOpenError {
            path: root.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        for purpose in [MediaPurpose::Profile, MediaPurpose::Incident] {
            dir.create_dir_all(purpose.directory()).map_err(open_error)?;
        }
        Ok(Self {
            root: Arc::new(dir),
        })
    }
}

/// Accept only names of the form `<uuid>.<allowed ext>`.
fn is_generated_name(file_name: &str) -> bool {
    file_name
        .split_once('.')
        .is_some_and(|(stem, _)| Uuid::parse_str(stem).is_ok())
        && ImageExtension::from_stored_name(file_name).is_some()
}

fn write_new(dir: &Dir, relative: &str, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(relative, &options)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store(
        &self,
        purpose: MediaPurpose,
        upload: &ImageUpload,
    ) -> Result<String, MediaStoreError> {
        let file_name = format!("{}.{}", Uuid::new_v4(), upload.extension().as_str());
        let relative = format!("{}/{file_name}", purpose.directory());
        let bytes = upload.bytes().to_vec();
        let dir = Arc::clone(&self.root);
        let target = relative.clone();
        tokio::task::spawn_blocking(move || write_new(&dir, &target, &bytes))
            .await
            .map_err(|err| MediaStoreError::write(err.to_string()))?
            .map_err(|err| MediaStoreError::write(format!("{relative}: {err}")))?;

        debug!(path = %relative, size = upload.bytes().len(), "stored upload");
        Ok(format!("{PUBLIC_UPLOAD_PREFIX}/{relative}"))
    }

    async fn load(
        &self,
        purpose: MediaPurpose,
        file_name: &str,
    ) -> Result<Option<Vec<u8>>, MediaStoreError> {
        if !is_generated_name(file_name) {
            return Ok(None);
        }
        let relative = format!("{}/{file_name}", purpose.directory());
        let dir = Arc::clone(&self.root);
        let outcome = tokio::task::spawn_blocking(move || dir.read(relative))
            .await
            .map_err(|err| MediaStoreError::read(err.to_string()))?;
        match outcome {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(MediaStoreError::read(err.to_string())),
        }
    }
}
