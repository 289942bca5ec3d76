//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// An uploaded file exceeds the size limit.
    #[schema(rename = "payload_too_large")]
    PayloadTooLarge,
    /// An uploaded file is not an allowed image type.
    #[schema(rename = "unsupported_media_type")]
    UnsupportedMediaType,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "username already exists")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UserSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserSummary)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSummarySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "student001")]
    username: String,
    #[schema(example = "user")]
    role: String,
    #[schema(example = "student")]
    user_type: String,
    #[schema(example = "Fagbuaro Babatunde Michael")]
    name: String,
    email: String,
    /// Present for students only.
    #[schema(example = "2789")]
    student_id: Option<String>,
    department: String,
    #[schema(example = "/uploads/profiles/3fa85f64-5717-4562-b3fc-2c963f66afa6.jpg")]
    profile_photo: Option<String>,
    registration_photo: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::MatchedStudent`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MatchedStudent)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MatchedStudentSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    name: String,
    student_id: Option<String>,
    email: String,
    department: String,
    photo: Option<String>,
    /// Percentage in `0..=100`.
    #[schema(example = 85, minimum = 0, maximum = 100)]
    confidence: u8,
}

/// OpenAPI schema for [`crate::domain::Incident`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Incident)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IncidentSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Broken window")]
    title: String,
    #[schema(rename = "type")]
    #[schema(example = "vandalism")]
    incident_type: String,
    #[schema(example = "high")]
    priority: String,
    location: String,
    description: String,
    contact: String,
    #[schema(example = "staff001")]
    reported_by: String,
    #[schema(example = "open")]
    status: String,
    #[schema(example = "/uploads/incidents/3fa85f64-5717-4562-b3fc-2c963f66afa6.jpg")]
    image_path: Option<String>,
    identified_students: Vec<MatchedStudentSchema>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::SessionSnapshot`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SessionSnapshot)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SessionSnapshotSchema {
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    username: String,
    role: String,
    user_type: String,
    name: String,
    student_id: Option<String>,
    department: String,
}

/// OpenAPI schema for [`crate::domain::DashboardSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DashboardSummary)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DashboardSummarySchema {
    user: SessionSnapshotSchema,
    total_incidents: usize,
    open_incidents: usize,
    active_alerts: usize,
    /// At most five, newest first.
    recent_incidents: Vec<IncidentSchema>,
    is_admin: bool,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "payload_too_large",
            "unsupported_media_type",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn user_summary_schema_has_no_password() {
        let schema_json = schema_to_json::<UserSummarySchema>();
        assert_eq!(UserSummarySchema::name(), "crate.domain.UserSummary");
        assert!(schema_json.contains("userType"));
        assert!(!schema_json.contains("password"));
    }

    #[rstest]
    fn incident_schema_uses_wire_names() {
        let schema_json = schema_to_json::<IncidentSchema>();
        assert!(schema_json.contains("\"type\""));
        assert!(schema_json.contains("identifiedStudents"));
        assert!(!schema_json.contains("incident_type"));
    }
}
