//! Incident intake service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    IncidentIntake, IncidentPersistenceError, IncidentRepository, MediaStore, MediaStoreError,
    StudentMatcher,
};
use crate::domain::{
    Error, ImageUpload, Incident, IncidentId, IncidentReport, IntakeStamp, MatchedStudent,
    MediaPurpose, SessionSnapshot, sort_newest_first,
};

/// Incident intake service implementing [`IncidentIntake`].
#[derive(Clone)]
pub struct IncidentIntakeService<R, M, S> {
    incidents: Arc<R>,
    media: Arc<M>,
    matcher: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<R, M, S> IncidentIntakeService<R, M, S> {
    /// Create a service over the incident store, media store, and matcher.
    pub fn new(incidents: Arc<R>, media: Arc<M>, matcher: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            incidents,
            media,
            matcher,
            clock,
        }
    }
}

fn map_incident_error(error: IncidentPersistenceError) -> Error {
    Error::internal(format!("incident repository error: {error}"))
}

fn map_media_error(error: MediaStoreError) -> Error {
    Error::internal(format!("media store error: {error}"))
}

impl<R, M, S> IncidentIntakeService<R, M, S>
where
    R: IncidentRepository,
    M: MediaStore,
    S: StudentMatcher,
{
    async fn identify(&self, image_path: &str) -> Vec<MatchedStudent> {
        match self.matcher.find_matches(image_path).await {
            Ok(matches) => matches,
            Err(err) => {
                warn!(error = %err, image_path, "student matching failed; recording no matches");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<R, M, S> IncidentIntake for IncidentIntakeService<R, M, S>
where
    R: IncidentRepository,
    M: MediaStore,
    S: StudentMatcher,
{
    async fn create_incident(
        &self,
        report: IncidentReport,
        reporter: &SessionSnapshot,
        image: Option<ImageUpload>,
    ) -> Result<Incident, Error> {
        let (image_path, identified_students) = match image {
            Some(upload) => {
                let path = self
                    .media
                    .store(MediaPurpose::Incident, &upload)
                    .await
                    .map_err(map_media_error)?;
                let matches = self.identify(&path).await;
                (Some(path), matches)
            }
            None => (None, Vec::new()),
        };

        let incident = report.into_incident(IntakeStamp {
            id: IncidentId::random(),
            reported_by: reporter.username.clone(),
            image_path,
            identified_students,
            now: self.clock.utc(),
        });
        self.incidents
            .append(incident.clone())
            .await
            .map_err(map_incident_error)?;

        info!(
            incident_id = %incident.id,
            reported_by = %incident.reported_by,
            matches = incident.identified_students.len(),
            "incident recorded"
        );
        Ok(incident)
    }

    async fn list_incidents(&self) -> Result<Vec<Incident>, Error> {
        let mut incidents = self.incidents.list().await.map_err(map_incident_error)?;
        sort_newest_first(&mut incidents);
        Ok(incidents)
    }
}

#[cfg(test)]
#[path = "incident_intake_tests.rs"]
mod tests;
