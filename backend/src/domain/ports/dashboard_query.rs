//! Driving port for the dashboard summary.

use async_trait::async_trait;

use crate::domain::{DashboardSummary, Error, SessionSnapshot};

/// Domain use-case port for dashboard counts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Counts and recent incidents as seen by `viewer`.
    async fn summary(&self, viewer: &SessionSnapshot) -> Result<DashboardSummary, Error>;
}
