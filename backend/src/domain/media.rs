//! Uploaded images and the rules that admit them.
//!
//! Only a small allowlist of raster formats is accepted. Both the file name
//! extension and the declared content type must be on the list; the two are
//! not required to agree with each other.

use std::fmt;

use super::Error;

/// Default per-file upload limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted file name extensions, compared case-insensitively.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Accepted declared content types.
pub const ALLOWED_IMAGE_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// What an uploaded image is for; decides where it lands on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaPurpose {
    /// Profile and registration photos attached to users.
    Profile,
    /// Scene photos attached to incident reports.
    Incident,
}

impl MediaPurpose {
    /// Directory name under the upload root.
    #[must_use]
    pub fn directory(self) -> &'static str {
        match self {
            Self::Profile => "profiles",
            Self::Incident => "incidents",
        }
    }

    /// Inverse of [`MediaPurpose::directory`].
    #[must_use]
    pub fn from_directory(directory: &str) -> Option<Self> {
        match directory {
            "profiles" => Some(Self::Profile),
            "incidents" => Some(Self::Incident),
            _ => None,
        }
    }
}

/// Why an upload was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// The file exceeded the configured byte limit.
    TooLarge { limit: usize },
    /// The file name extension is not an allowed image type.
    UnsupportedExtension { file_name: String },
    /// The declared content type is missing or not an allowed image type.
    UnsupportedContentType { content_type: Option<String> },
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { limit } => write!(f, "file exceeds the {limit} byte upload limit"),
            Self::UnsupportedExtension { file_name } => {
                write!(f, "only image files are allowed (got {file_name:?})")
            }
            Self::UnsupportedContentType { content_type } => match content_type {
                Some(value) => write!(f, "only image files are allowed (got {value})"),
                None => f.write_str("only image files are allowed (no content type)"),
            },
        }
    }
}

impl std::error::Error for UploadRejection {}

impl From<UploadRejection> for Error {
    fn from(value: UploadRejection) -> Self {
        match value {
            UploadRejection::TooLarge { .. } => Self::payload_too_large(value.to_string()),
            UploadRejection::UnsupportedExtension { .. }
            | UploadRejection::UnsupportedContentType { .. } => {
                Self::unsupported_media_type(value.to_string())
            }
        }
    }
}

/// Admission rules for uploaded images.
///
/// # Examples
/// ```
/// use campus_security::domain::ImagePolicy;
///
/// let policy = ImagePolicy::new(1024);
/// let ext = policy.admit_type("Scene.JPG", Some("image/jpeg")).unwrap();
/// assert_eq!(ext.as_str(), "jpg");
/// assert!(policy.admit_type("payload.exe", Some("image/png")).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePolicy {
    max_bytes: usize,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl ImagePolicy {
    /// Build a policy with the given per-file byte limit.
    #[must_use]
    pub const fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Per-file byte limit.
    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Check the file name and declared content type against the allowlist.
    pub fn admit_type(
        &self,
        file_name: &str,
        content_type: Option<&str>,
    ) -> Result<ImageExtension, UploadRejection> {
        let extension = ImageExtension::from_file_name(file_name).ok_or_else(|| {
            UploadRejection::UnsupportedExtension {
                file_name: file_name.to_owned(),
            }
        })?;
        let declared = content_type.map(|value| {
            value
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        });
        match declared.as_deref() {
            Some(value) if ALLOWED_IMAGE_CONTENT_TYPES.contains(&value) => Ok(extension),
            _ => Err(UploadRejection::UnsupportedContentType {
                content_type: content_type.map(str::to_owned),
            }),
        }
    }

    /// Check an accumulated byte count against the limit.
    pub fn admit_size(&self, len: usize) -> Result<(), UploadRejection> {
        if len > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Lowercased allowlisted extension taken from the uploaded file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageExtension(String);

impl ImageExtension {
    fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        ALLOWED_IMAGE_EXTENSIONS
            .contains(&ext.as_str())
            .then_some(Self(ext))
    }

    /// Parse the extension of a stored file name such as `<uuid>.png`.
    #[must_use]
    pub fn from_stored_name(file_name: &str) -> Option<Self> {
        Self::from_file_name(file_name)
    }

    /// Extension without the leading dot.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Content type to serve a stored file with.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self.0.as_str() {
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "image/jpeg",
        }
    }
}

/// An admitted image held in memory until the media store persists it.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    extension: ImageExtension,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Pair admitted bytes with their extension.
    #[must_use]
    pub fn new(extension: ImageExtension, bytes: Vec<u8>) -> Self {
        Self { extension, bytes }
    }

    /// Extension used for the stored file name.
    #[must_use]
    pub fn extension(&self) -> &ImageExtension {
        &self.extension
    }

    /// Raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("extension", &self.extension)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("photo.jpg", "image/jpeg", "jpg")]
    #[case("PHOTO.JPEG", "image/jpeg", "jpeg")]
    #[case("cat.png", "image/png; charset=binary", "png")]
    #[case("anim.gif", "image/gif", "gif")]
    #[case("modern.webp", "IMAGE/WEBP", "webp")]
    fn allowlisted_images_are_admitted(
        #[case] name: &str,
        #[case] content_type: &str,
        #[case] expected: &str,
    ) {
        let ext = ImagePolicy::default()
            .admit_type(name, Some(content_type))
            .expect("allowed image");
        assert_eq!(ext.as_str(), expected);
    }

    #[rstest]
    #[case("malware.exe", Some("image/png"))]
    #[case("noextension", Some("image/png"))]
    #[case("photo.png", Some("application/octet-stream"))]
    #[case("photo.png", None)]
    #[case("vector.svg", Some("image/svg+xml"))]
    fn everything_else_is_unsupported(#[case] name: &str, #[case] content_type: Option<&str>) {
        let err = ImagePolicy::default()
            .admit_type(name, content_type)
            .expect_err("must be rejected");
        assert_eq!(Error::from(err).code(), ErrorCode::UnsupportedMediaType);
    }

    #[rstest]
    fn size_limit_is_inclusive() {
        let policy = ImagePolicy::new(4);
        assert!(policy.admit_size(4).is_ok());
        let err = policy.admit_size(5).expect_err("over limit");
        assert_eq!(err, UploadRejection::TooLarge { limit: 4 });
        assert_eq!(Error::from(err).code(), ErrorCode::PayloadTooLarge);
    }

    #[rstest]
    #[case(MediaPurpose::Profile, "profiles")]
    #[case(MediaPurpose::Incident, "incidents")]
    fn purposes_map_to_directories(#[case] purpose: MediaPurpose, #[case] directory: &str) {
        assert_eq!(purpose.directory(), directory);
        assert_eq!(MediaPurpose::from_directory(directory), Some(purpose));
    }

    #[rstest]
    #[case("a.jpeg", "image/jpeg")]
    #[case("a.png", "image/png")]
    #[case("a.gif", "image/gif")]
    #[case("a.webp", "image/webp")]
    fn stored_names_map_to_content_types(#[case] name: &str, #[case] expected: &str) {
        let ext = ImageExtension::from_stored_name(name).expect("known extension");
        assert_eq!(ext.content_type(), expected);
    }
}
