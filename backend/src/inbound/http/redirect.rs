//! `303 See Other` responses used for the form-post page flow.

use actix_web::HttpResponse;
use actix_web::http::header;

/// Path of the login entry point.
pub const LOGIN_PATH: &str = "/login";

/// `303 See Other` pointing at `location`.
#[must_use]
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}
