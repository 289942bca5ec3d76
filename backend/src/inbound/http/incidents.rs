//! Incident reporting handlers.
//!
//! ```text
//! GET  /incidents/new   -> report form descriptor
//! POST /incidents       multipart: title, type, priority, location,
//!                       description, contact, image (optional file)
//! GET  /incidents       -> every incident, newest first
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use serde_json::json;

use crate::domain::{
    ApiResult, Error, INCIDENT_PRIORITIES, INCIDENT_TYPES, Incident, IncidentFields,
    IncidentReport, IncidentValidationError,
};

use super::redirect::see_other;
use super::schemas::{ErrorSchema, IncidentSchema};
use super::session::AuthenticatedSession;
use super::state::HttpState;
use super::upload::read_form;

/// Where a new report lands once stored.
pub const INCIDENTS_PATH: &str = "/incidents";

/// Multipart part carrying the optional scene photo.
pub const IMAGE_FIELD: &str = "image";

/// Options offered on the report form.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFormPage {
    #[schema(example = json!(["theft", "vandalism", "other"]))]
    pub incident_types: Vec<&'static str>,
    #[schema(example = json!(["low", "medium", "high", "critical"]))]
    pub priorities: Vec<&'static str>,
}

/// Multipart body accepted by `POST /incidents`, for documentation only.
#[derive(utoipa::ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IncidentUploadForm {
    title: String,
    #[schema(rename = "type", example = "vandalism")]
    incident_type: String,
    #[schema(example = "high")]
    priority: String,
    location: String,
    description: String,
    contact: String,
    /// JPEG, PNG, GIF, or WebP scene photo.
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

fn map_incident_validation_error(err: IncidentValidationError) -> Error {
    let IncidentValidationError::MissingField(field) = err;
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

/// Describe the incident report form.
#[utoipa::path(
    get,
    path = "/incidents/new",
    responses(
        (status = 200, description = "Report form descriptor", body = IncidentFormPage),
        (status = 303, description = "No live session; redirect to /login", headers(("Location" = String)))
    ),
    tags = ["incidents"],
    operation_id = "incidentForm"
)]
#[get("/incidents/new")]
pub async fn incident_form(_session: AuthenticatedSession) -> web::Json<IncidentFormPage> {
    web::Json(IncidentFormPage {
        incident_types: INCIDENT_TYPES.to_vec(),
        priorities: INCIDENT_PRIORITIES.to_vec(),
    })
}

/// Report an incident, optionally with a scene photo.
///
/// The photo is admitted before anything is stored. A rejected photo fails
/// the whole request and no incident is recorded.
#[utoipa::path(
    post,
    path = "/incidents",
    request_body(content = IncidentUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Incident stored; redirect to /incidents", headers(("Location" = String))),
        (status = 400, description = "A required field is missing", body = ErrorSchema),
        (status = 413, description = "Photo exceeds the upload limit", body = ErrorSchema),
        (status = 415, description = "Photo is not an allowed image type", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["incidents"],
    operation_id = "createIncident"
)]
#[post("/incidents")]
pub async fn create_incident(
    state: web::Data<HttpState>,
    session: AuthenticatedSession,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let mut form = read_form(payload, state.image_policy, &[IMAGE_FIELD]).await?;
    let image = form.take_image(IMAGE_FIELD);
    let report = IncidentReport::try_from_fields(IncidentFields {
        title: form.take_text("title"),
        incident_type: form.take_text("type"),
        priority: form.take_text("priority"),
        location: form.take_text("location"),
        description: form.take_text("description"),
        contact: form.take_text("contact"),
    })
    .map_err(map_incident_validation_error)?;

    state
        .incidents
        .create_incident(report, session.snapshot(), image)
        .await?;
    Ok(see_other(INCIDENTS_PATH))
}

/// List every incident, newest first.
#[utoipa::path(
    get,
    path = "/incidents",
    responses(
        (status = 200, description = "Incidents", body = [IncidentSchema]),
        (status = 303, description = "No live session; redirect to /login", headers(("Location" = String))),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["incidents"],
    operation_id = "listIncidents"
)]
#[get("/incidents")]
pub async fn list_incidents(
    state: web::Data<HttpState>,
    _session: AuthenticatedSession,
) -> ApiResult<web::Json<Vec<Incident>>> {
    let incidents = state.incidents.list_incidents().await?;
    Ok(web::Json(incidents))
}

#[cfg(test)]
#[path = "incidents_tests.rs"]
mod tests;
