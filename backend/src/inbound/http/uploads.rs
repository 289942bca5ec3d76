//! Serves stored images to signed-in users.
//!
//! ```text
//! GET /uploads/{folder}/{file}   folder: profiles | incidents
//! ```

use actix_web::http::header::{self, CacheControl, CacheDirective};
use actix_web::{HttpResponse, get, web};
use tracing::warn;

use crate::domain::{ApiResult, Error, ImageExtension, MediaPurpose};

use super::schemas::ErrorSchema;
use super::session::AuthenticatedSession;
use super::state::HttpState;

fn not_found() -> Error {
    Error::not_found("no such upload")
}

/// Stream a previously uploaded image.
///
/// Unknown folders, names the media store could not have generated, and
/// missing files all answer `404`.
#[utoipa::path(
    get,
    path = "/uploads/{folder}/{file}",
    params(
        ("folder" = String, Path, description = "`profiles` or `incidents`"),
        ("file" = String, Path, description = "Stored file name, e.g. `<uuid>.jpg`")
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 303, description = "No live session; redirect to /login", headers(("Location" = String))),
        (status = 404, description = "No such upload", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["uploads"],
    operation_id = "getUpload"
)]
#[get("/uploads/{folder}/{file}")]
pub async fn get_upload(
    state: web::Data<HttpState>,
    _session: AuthenticatedSession,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (folder, file) = path.into_inner();
    let purpose = MediaPurpose::from_directory(&folder).ok_or_else(not_found)?;
    let extension = ImageExtension::from_stored_name(&file).ok_or_else(not_found)?;
    let bytes = state
        .media
        .load(purpose, &file)
        .await
        .map_err(|err| {
            warn!(folder = %folder, file = %file, error = %err, "failed to read upload");
            Error::internal(format!("media store error: {err}"))
        })?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, extension.content_type()))
        .insert_header(CacheControl(vec![CacheDirective::Private]))
        .body(bytes))
}
