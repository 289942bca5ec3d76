//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ImagePolicy;
use crate::domain::ports::{
    DashboardQuery, IncidentIntake, LoginService, MediaStore, SessionManager, UserDirectory,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub sessions: Arc<dyn SessionManager>,
    pub incidents: Arc<dyn IncidentIntake>,
    pub users: Arc<dyn UserDirectory>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub media: Arc<dyn MediaStore>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub sessions: Arc<dyn SessionManager>,
    pub incidents: Arc<dyn IncidentIntake>,
    pub users: Arc<dyn UserDirectory>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub media: Arc<dyn MediaStore>,
    pub image_policy: ImagePolicy,
}

impl HttpState {
    /// Construct state from a ports bundle and the upload admission rules.
    pub fn new(ports: HttpStatePorts, image_policy: ImagePolicy) -> Self {
        let HttpStatePorts {
            login,
            sessions,
            incidents,
            users,
            dashboard,
            media,
        } = ports;
        Self {
            login,
            sessions,
            incidents,
            users,
            dashboard,
            media,
            image_policy,
        }
    }
}
