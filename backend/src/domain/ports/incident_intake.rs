//! Driving port for reporting and listing incidents.

use async_trait::async_trait;

use crate::domain::{Error, ImageUpload, Incident, IncidentReport, SessionSnapshot};

/// Domain use-case port for incident intake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncidentIntake: Send + Sync {
    /// Record a new incident reported by `reporter`.
    ///
    /// When `image` is present it is stored first and the student matcher is
    /// consulted with the stored reference.
    async fn create_incident(
        &self,
        report: IncidentReport,
        reporter: &SessionSnapshot,
        image: Option<ImageUpload>,
    ) -> Result<Incident, Error>;

    /// All incidents, newest first.
    async fn list_incidents(&self) -> Result<Vec<Incident>, Error>;
}
