//! Login, logout, and the landing redirect.
//!
//! ```text
//! GET  /                                  -> 303 /dashboard | /login
//! GET  /login?error=invalid_credentials   -> login form descriptor
//! POST /login  username=..&password=..&userType=..
//! GET  /logout                            -> 303 /login
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    ApiResult, Error, ErrorCode, LoginCredentials, LoginValidationError, UserType,
};

use super::redirect::{LOGIN_PATH, see_other};
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;

/// Where a successful login lands.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Redirect target after rejected credentials.
pub const LOGIN_FAILED_PATH: &str = "/login?error=invalid_credentials";

/// Login form body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginForm {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "admin123")]
    pub password: String,
    /// One of `admin`, `student`, `staff`.
    #[schema(example = "admin")]
    pub user_type: String,
}

/// Query string accepted by `GET /login`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(default)]
pub struct LoginQuery {
    /// Error code from a failed attempt.
    pub error: Option<String>,
}

/// Data needed to render a login form.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    /// Selectable user types, in display order.
    #[schema(example = json!(["admin", "student", "staff"]))]
    pub user_types: Vec<&'static str>,
    /// Error code echoed from the query string.
    #[schema(example = "invalid_credentials")]
    pub error: Option<String>,
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Send visitors to the dashboard when logged in, otherwise to the login page.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 303, description = "Redirect to /dashboard or /login", headers(("Location" = String)))
    ),
    tags = ["auth"],
    operation_id = "index",
    security([])
)]
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let live = match session.token()? {
        Some(token) => state.sessions.resolve(&token).await?.is_some(),
        None => false,
    };
    Ok(see_other(if live { DASHBOARD_PATH } else { LOGIN_PATH }))
}

/// Describe the login form.
#[utoipa::path(
    get,
    path = "/login",
    params(LoginQuery),
    responses((status = 200, description = "Login form descriptor", body = LoginPage)),
    tags = ["auth"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form(query: web::Query<LoginQuery>) -> web::Json<LoginPage> {
    web::Json(LoginPage {
        user_types: UserType::ALL.into_iter().map(UserType::as_str).collect(),
        error: query.into_inner().error,
    })
}

/// Authenticate and establish a session.
///
/// Wrong credentials are not an error response: the browser is sent back to
/// the login page with `?error=invalid_credentials`, as a form post would be.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /dashboard with a session cookie, or back to /login with an error", headers(("Location" = String), ("Set-Cookie" = String))),
        (status = 400, description = "Username or password empty", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&form.username, &form.password, &form.user_type)
            .map_err(|err| map_login_validation_error(&err))?;

    let user = match state.login.authenticate(&credentials).await {
        Ok(user) => user,
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            info!(username = credentials.username(), "login rejected");
            return Ok(see_other(LOGIN_FAILED_PATH));
        }
        Err(err) => return Err(err),
    };
    let token = state.sessions.establish(&user).await?;
    session.persist_token(&token)?;
    Ok(see_other(DASHBOARD_PATH))
}

/// End the session and return to the login page.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Session destroyed; redirect to /login", headers(("Location" = String)))
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(token) = session.token()? {
        state.sessions.destroy(&token).await?;
    }
    session.purge();
    Ok(see_other(LOGIN_PATH))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
