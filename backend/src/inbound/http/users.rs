//! User administration handlers. Admin only.
//!
//! ```text
//! GET  /users   -> every user without password hashes
//! POST /users   multipart: username, password, name, email, role, userType,
//!               studentId, department, profilePhoto, registrationPhoto
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use tracing::info;

use crate::domain::ports::UserPhotos;
use crate::domain::{ApiResult, Error, NewUser, NewUserFields, UserSummary, UserValidationError};

use super::redirect::see_other;
use super::schemas::{ErrorSchema, UserSummarySchema};
use super::session::AuthenticatedSession;
use super::state::HttpState;
use super::upload::read_form;

/// Where a created user lands.
pub const USERS_PATH: &str = "/users";

const PROFILE_PHOTO_FIELD: &str = "profilePhoto";
const REGISTRATION_PHOTO_FIELD: &str = "registrationPhoto";

/// Multipart body accepted by `POST /users`, for documentation only.
#[derive(utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserUploadForm {
    #[schema(example = "student002")]
    username: String,
    password: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    email: String,
    /// `admin` or `user`.
    #[schema(example = "user")]
    role: String,
    /// `admin`, `student`, or `staff`.
    #[schema(example = "student")]
    user_type: String,
    /// Kept for students only.
    student_id: Option<String>,
    department: String,
    #[schema(value_type = Option<String>, format = Binary)]
    profile_photo: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    registration_photo: Option<Vec<u8>>,
}

fn map_user_validation_error(err: &UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

/// Create a user with optional profile and registration photos.
///
/// Both photos are admitted before the user is written; one bad photo fails
/// the request and leaves the users collection unchanged.
#[utoipa::path(
    post,
    path = "/users",
    request_body(content = UserUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "User created; redirect to /users", headers(("Location" = String))),
        (status = 400, description = "A field failed validation", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 409, description = "Username already exists", body = ErrorSchema),
        (status = 413, description = "Photo exceeds the upload limit", body = ErrorSchema),
        (status = 415, description = "Photo is not an allowed image type", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: AuthenticatedSession,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let mut form = read_form(
        payload,
        state.image_policy,
        &[PROFILE_PHOTO_FIELD, REGISTRATION_PHOTO_FIELD],
    )
    .await?;
    let photos = UserPhotos {
        profile: form.take_image(PROFILE_PHOTO_FIELD),
        registration: form.take_image(REGISTRATION_PHOTO_FIELD),
    };
    let new_user = NewUser::try_from_parts(NewUserFields {
        username: form.take_text("username"),
        password: form.take_text("password"),
        name: form.take_text("name"),
        email: form.take_text("email"),
        role: form.take_text("role"),
        user_type: form.take_text("userType"),
        student_id: form.take_optional_text("studentId"),
        department: form.take_text("department"),
    })
    .map_err(|err| map_user_validation_error(&err))?;

    let created = state.users.create_user(new_user, photos).await?;
    info!(
        username = %created.username,
        created_by = %session.snapshot().username,
        "user created"
    );
    Ok(see_other(USERS_PATH))
}

/// List every user in store order.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSummarySchema]),
        (status = 303, description = "No live session; redirect to /login", headers(("Location" = String))),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: AuthenticatedSession,
) -> ApiResult<web::Json<Vec<UserSummary>>> {
    session.require_admin()?;
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
