//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, media, hashing, sessions, matching) carry
//! their own `thiserror` enums; driving ports speak the domain [`Error`].
//!
//! [`Error`]: crate::domain::Error

mod macros;
pub(crate) use macros::define_port_error;

mod alert_repository;
mod dashboard_query;
mod incident_intake;
mod incident_repository;
mod login_service;
mod media_store;
mod password_hasher;
mod session_registry;
mod student_matcher;
mod user_directory;
mod user_repository;

#[cfg(test)]
pub use alert_repository::MockAlertRepository;
pub use alert_repository::{AlertPersistenceError, AlertRepository};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use incident_intake::MockIncidentIntake;
pub use incident_intake::IncidentIntake;
#[cfg(test)]
pub use incident_repository::MockIncidentRepository;
pub use incident_repository::{IncidentPersistenceError, IncidentRepository};
#[cfg(test)]
pub use login_service::{MockLoginService, MockSessionManager};
pub use login_service::{LoginService, SessionManager};
#[cfg(test)]
pub use media_store::MockMediaStore;
pub use media_store::{MediaStore, MediaStoreError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_registry::MockSessionRegistry;
pub use session_registry::SessionRegistry;
#[cfg(test)]
pub use student_matcher::MockStudentMatcher;
pub use student_matcher::{StudentMatcher, StudentMatcherError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserPhotos};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
