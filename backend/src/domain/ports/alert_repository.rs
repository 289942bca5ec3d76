//! Read-only port over the externally populated alert collection.
use async_trait::async_trait;

use crate::domain::Alert;

use super::define_port_error;

define_port_error! {
    /// Errors raised by alert repository adapters.
    pub enum AlertPersistenceError {
        /// The stored collection could not be read.
        Read { message: String } => "alert store read failed: {message}",
    }
}

/// Port for reading alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// All alerts in store order.
    async fn list(&self) -> Result<Vec<Alert>, AlertPersistenceError>;
}
