//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed records for users, incidents, alerts, and
//! sessions, plus the services that implement the driving ports. Nothing in
//! here knows about HTTP or the filesystem; adapters live in `inbound` and
//! `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, NewUser, UserSummary: stored users and their public projection.
//! - Incident, IncidentReport, MatchedStudent: incident records and intake.
//! - SessionSnapshot, SessionToken: server-held login state.
//! - ImagePolicy, ImageUpload: admission rules for uploaded images.

pub mod alert;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod incident;
pub mod incident_intake;
pub mod media;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod user;
pub mod user_directory;

pub use self::alert::Alert;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::dashboard::{DashboardService, DashboardSummary, RECENT_INCIDENT_LIMIT};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::identity::IdentityService;
pub use self::incident::{
    INCIDENT_PRIORITIES, INCIDENT_TYPES, Incident, IncidentFields, IncidentId, IncidentReport,
    IncidentStatus, IncidentValidationError, IntakeStamp, MatchedStudent, sort_newest_first,
};
pub use self::incident_intake::IncidentIntakeService;
pub use self::media::{
    ALLOWED_IMAGE_CONTENT_TYPES, ALLOWED_IMAGE_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES,
    ImageExtension, ImagePolicy, ImageUpload, MediaPurpose, UploadRejection,
};
pub use self::session::{SessionSnapshot, SessionToken};
pub use self::trace_id::TraceId;
pub use self::user::{
    NewUser, NewUserFields, Role, StoredPhotos, User, UserId, UserSummary, UserType,
    UserValidationError,
};
pub use self::user_directory::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use campus_security::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("admin access required"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
