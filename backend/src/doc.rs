//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the HTTP interface. It registers:
//!
//! - **Paths**: every handler from the inbound layer (auth, dashboard,
//!   incidents, users, uploads, health)
//! - **Schemas**: wrappers in [`crate::inbound::http::schemas`] describing
//!   domain types without coupling them to utoipa, plus the form and page
//!   descriptors owned by the handlers
//! - **Security**: session cookie authentication scheme
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{LoginForm, LoginPage};
use crate::inbound::http::incidents::{IncidentFormPage, IncidentUploadForm};
use crate::inbound::http::schemas::{
    DashboardSummarySchema, ErrorCodeSchema, ErrorSchema, IncidentSchema, MatchedStudentSchema,
    SessionSnapshotSchema, UserSummarySchema,
};
use crate::inbound::http::users::UserUploadForm;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP interface.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus security API",
        description = "Incident reporting, user directory, and dashboard for campus security staff."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::index,
        crate::inbound::http::auth::login_form,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::incidents::incident_form,
        crate::inbound::http::incidents::create_incident,
        crate::inbound::http::incidents::list_incidents,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::uploads::get_upload,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSummarySchema,
        MatchedStudentSchema,
        IncidentSchema,
        SessionSnapshotSchema,
        DashboardSummarySchema,
        LoginForm,
        LoginPage,
        IncidentFormPage,
        IncidentUploadForm,
        UserUploadForm,
    )),
    tags(
        (name = "auth", description = "Sign-in, sign-out, and landing redirects"),
        (name = "dashboard", description = "Per-user summary of recent activity"),
        (name = "incidents", description = "Incident intake and listing"),
        (name = "users", description = "User directory, administrators only"),
        (name = "uploads", description = "Stored profile and incident images"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const INCIDENT_SCHEMA_NAME: &str = "crate.domain.Incident";
    const DASHBOARD_SCHEMA_NAME: &str = "crate.domain.DashboardSummary";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    fn schema(name: &str) -> RefOr<Schema> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        schemas.get(name).cloned().expect("schema registered")
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(INCIDENT_SCHEMA_NAME, "type")]
    #[case(INCIDENT_SCHEMA_NAME, "identifiedStudents")]
    #[case(DASHBOARD_SCHEMA_NAME, "recentIncidents")]
    #[case(DASHBOARD_SCHEMA_NAME, "isAdmin")]
    fn schemas_expose_wire_field_names(#[case] name: &str, #[case] field: &str) {
        assert_object_schema_has_field(&schema(name), field);
    }

    #[rstest]
    #[case("/login")]
    #[case("/dashboard")]
    #[case("/incidents")]
    #[case("/users")]
    #[case("/uploads/{folder}/{file}")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
