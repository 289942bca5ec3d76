//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

pub mod multipart {
    //! Hand-built `multipart/form-data` bodies.

    /// Boundary used for every generated body.
    pub const BOUNDARY: &str = "campus-security-test-boundary";

    /// Incrementally assembled multipart body.
    ///
    /// # Examples
    /// ```
    /// use campus_security::test_support::multipart::MultipartBody;
    ///
    /// let body = MultipartBody::new()
    ///     .text("title", "Broken window")
    ///     .file("image", "scene.png", "image/png", b"\x89PNG");
    /// assert!(body.content_type().starts_with("multipart/form-data"));
    /// let bytes = body.finish();
    /// assert!(bytes.ends_with(b"--\r\n"));
    /// ```
    #[derive(Debug, Default)]
    pub struct MultipartBody {
        body: Vec<u8>,
    }

    impl MultipartBody {
        /// Empty body.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Append a plain text field.
        #[must_use]
        pub fn text(mut self, name: &str, value: &str) -> Self {
            self.open_part(&format!("form-data; name=\"{name}\""), None);
            self.body.extend_from_slice(value.as_bytes());
            self.body.extend_from_slice(b"\r\n");
            self
        }

        /// Append a file field.
        #[must_use]
        pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
            self.open_part(
                &format!("form-data; name=\"{name}\"; filename=\"{file_name}\""),
                Some(content_type),
            );
            self.body.extend_from_slice(bytes);
            self.body.extend_from_slice(b"\r\n");
            self
        }

        /// Value for the request `Content-Type` header.
        #[must_use]
        pub fn content_type(&self) -> String {
            format!("multipart/form-data; boundary={BOUNDARY}")
        }

        /// Close the body and return its bytes.
        #[must_use]
        pub fn finish(mut self) -> Vec<u8> {
            self.body
                .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
            self.body
        }

        fn open_part(&mut self, disposition: &str, content_type: Option<&str>) {
            self.body
                .extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            self.body.extend_from_slice(
                format!("Content-Disposition: {disposition}\r\n").as_bytes(),
            );
            if let Some(content_type) = content_type {
                self.body
                    .extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
            self.body.extend_from_slice(b"\r\n");
        }
    }
}
