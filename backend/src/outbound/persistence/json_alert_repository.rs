//! Alert repository over the `alerts` collection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Alert;
use crate::domain::ports::{AlertPersistenceError, AlertRepository};

use super::{Collection, JsonStore};

/// Read-only [`AlertRepository`] backed by [`JsonStore`].
#[derive(Clone)]
pub struct JsonAlertRepository {
    store: Arc<JsonStore>,
}

impl JsonAlertRepository {
    /// Create a repository sharing `store`.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AlertRepository for JsonAlertRepository {
    async fn list(&self) -> Result<Vec<Alert>, AlertPersistenceError> {
        Ok(self.store.read(Collection::Alerts).await)
    }
}
