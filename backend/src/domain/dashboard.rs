//! Dashboard summary service.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ports::{
    AlertPersistenceError, AlertRepository, DashboardQuery, IncidentPersistenceError,
    IncidentRepository,
};
use crate::domain::{Error, Incident, IncidentStatus, SessionSnapshot, sort_newest_first};

/// Number of incidents shown in the recent list.
pub const RECENT_INCIDENT_LIMIT: usize = 5;

/// Counts and recent activity shown after login.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user: SessionSnapshot,
    pub total_incidents: usize,
    pub open_incidents: usize,
    pub active_alerts: usize,
    pub recent_incidents: Vec<Incident>,
    pub is_admin: bool,
}

/// Dashboard service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService<I, A> {
    incidents: Arc<I>,
    alerts: Arc<A>,
}

impl<I, A> DashboardService<I, A> {
    /// Create a service over the incident and alert collections.
    pub fn new(incidents: Arc<I>, alerts: Arc<A>) -> Self {
        Self { incidents, alerts }
    }
}

fn map_incident_error(error: IncidentPersistenceError) -> Error {
    Error::internal(format!("incident repository error: {error}"))
}

fn map_alert_error(error: AlertPersistenceError) -> Error {
    Error::internal(format!("alert repository error: {error}"))
}

#[async_trait]
impl<I, A> DashboardQuery for DashboardService<I, A>
where
    I: IncidentRepository,
    A: AlertRepository,
{
    async fn summary(&self, viewer: &SessionSnapshot) -> Result<DashboardSummary, Error> {
        let mut incidents = self.incidents.list().await.map_err(map_incident_error)?;
        let active_alerts = self.alerts.list().await.map_err(map_alert_error)?.len();

        let total_incidents = incidents.len();
        let open_incidents = incidents
            .iter()
            .filter(|incident| incident.status == IncidentStatus::Open)
            .count();
        sort_newest_first(&mut incidents);
        incidents.truncate(RECENT_INCIDENT_LIMIT);

        Ok(DashboardSummary {
            user: viewer.clone(),
            total_incidents,
            open_incidents,
            active_alerts,
            recent_incidents: incidents,
            is_admin: viewer.is_admin(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAlertRepository, MockIncidentRepository};
    use crate::domain::{
        Alert, IncidentFields, IncidentId, IncidentReport, IntakeStamp, Role, UserId, UserType,
    };
    use chrono::{TimeDelta, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn incident(title: &str, minute: i64, status: IncidentStatus) -> Incident {
        let base = Utc
            .with_ymd_and_hms(2025, 1, 6, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let mut incident = IncidentReport::try_from_fields(IncidentFields {
            title: title.into(),
            incident_type: "theft".into(),
            priority: "low".into(),
            location: "Gym".into(),
            description: "Locker forced".into(),
            contact: "x".into(),
        })
        .expect("valid report")
        .into_incident(IntakeStamp {
            id: IncidentId::random(),
            reported_by: "staff001".into(),
            image_path: None,
            identified_students: Vec::new(),
            now: base + TimeDelta::minutes(minute),
        });
        incident.status = status;
        incident
    }

    #[fixture]
    fn viewer() -> SessionSnapshot {
        SessionSnapshot {
            user_id: UserId::random(),
            username: "staff001".into(),
            role: Role::User,
            user_type: UserType::Staff,
            name: "Dr. John Smith".into(),
            student_id: None,
            department: "Computer Science".into(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn summary_counts_and_limits_recent(viewer: SessionSnapshot) {
        let stored: Vec<Incident> = (0..7)
            .map(|minute| {
                let status = if minute % 2 == 0 {
                    IncidentStatus::Open
                } else {
                    IncidentStatus::Resolved
                };
                incident(&format!("incident-{minute}"), minute, status)
            })
            .collect();
        let mut incidents = MockIncidentRepository::new();
        incidents
            .expect_list()
            .times(1)
            .return_once(move || Ok(stored));
        let mut alerts = MockAlertRepository::new();
        alerts.expect_list().times(1).return_once(|| {
            Ok(vec![
                Alert::new(json!({"level": "amber"})),
                Alert::new(json!("free text")),
            ])
        });

        let service = DashboardService::new(Arc::new(incidents), Arc::new(alerts));
        let summary = service.summary(&viewer).await.expect("summary");

        assert_eq!(summary.total_incidents, 7);
        assert_eq!(summary.open_incidents, 4);
        assert_eq!(summary.active_alerts, 2);
        assert!(!summary.is_admin);
        let titles: Vec<_> = summary
            .recent_incidents
            .iter()
            .map(|incident| incident.title.as_str())
            .collect();
        assert_eq!(
            titles,
            ["incident-6", "incident-5", "incident-4", "incident-3", "incident-2"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn repository_failures_surface_as_internal(viewer: SessionSnapshot) {
        let mut incidents = MockIncidentRepository::new();
        incidents
            .expect_list()
            .return_once(|| Err(IncidentPersistenceError::read("disk gone")));
        let mut alerts = MockAlertRepository::new();
        alerts.expect_list().returning(|| Ok(Vec::new()));

        let service = DashboardService::new(Arc::new(incidents), Arc::new(alerts));
        let err = service.summary(&viewer).await.expect_err("must fail");
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
    }
}
