//! Port for the pluggable student identification capability.
//!
//! Incident intake hands the matcher the stored image reference and embeds
//! whatever comes back. Swapping in a real recogniser only needs a new
//! adapter.
use async_trait::async_trait;

use crate::domain::MatchedStudent;

use super::define_port_error;

define_port_error! {
    /// Errors raised by student matcher adapters.
    pub enum StudentMatcherError {
        /// The matcher could not produce candidates.
        Unavailable { message: String } => "student matcher unavailable: {message}",
    }
}

/// Port for identifying students in an incident photo.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentMatcher: Send + Sync {
    /// Candidate students for the image stored at `image_path`.
    async fn find_matches(
        &self,
        image_path: &str,
    ) -> Result<Vec<MatchedStudent>, StudentMatcherError>;
}
