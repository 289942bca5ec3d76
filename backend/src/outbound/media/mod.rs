//! Filesystem-backed media store for uploaded images.

mod fs_media_store;

pub use fs_media_store::{FsMediaStore, MediaStoreOpenError, PUBLIC_UPLOAD_PREFIX};
