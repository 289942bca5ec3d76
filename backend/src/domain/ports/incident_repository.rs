//! Port abstraction for incident persistence.
use async_trait::async_trait;

use crate::domain::Incident;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by incident repository adapters.
    pub enum IncidentPersistenceError {
        /// The stored collection could not be read or parsed.
        Read { message: String } => "incident store read failed: {message}",
        /// The collection could not be written back.
        Write { message: String } => "incident store write failed: {message}",
    }
}

/// Port for the incident collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// All incidents in store (insertion) order.
    async fn list(&self) -> Result<Vec<Incident>, IncidentPersistenceError>;

    /// Append one incident without losing concurrent appends.
    async fn append(&self, incident: Incident) -> Result<(), IncidentPersistenceError>;
}
