//! Incident repository over the `incidents` collection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Incident;
use crate::domain::ports::{IncidentPersistenceError, IncidentRepository};

use super::{Collection, JsonStore, StoreError};

/// [`IncidentRepository`] backed by [`JsonStore`].
#[derive(Clone)]
pub struct JsonIncidentRepository {
    store: Arc<JsonStore>,
}

impl JsonIncidentRepository {
    /// Create a repository sharing `store`.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

impl From<StoreError> for IncidentPersistenceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Read { .. } | StoreError::Corrupt { .. } | StoreError::Open { .. } => {
                Self::read(error.to_string())
            }
            StoreError::Write { .. } | StoreError::Task { .. } => Self::write(error.to_string()),
        }
    }
}

#[async_trait]
impl IncidentRepository for JsonIncidentRepository {
    async fn list(&self) -> Result<Vec<Incident>, IncidentPersistenceError> {
        Ok(self.store.read(Collection::Incidents).await)
    }

    async fn append(&self, incident: Incident) -> Result<(), IncidentPersistenceError> {
        self.store
            .modify(Collection::Incidents, move |incidents: &mut Vec<Incident>| {
                incidents.push(incident);
                Ok(())
            })
            .await
    }
}
