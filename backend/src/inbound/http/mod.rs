//! HTTP inbound adapter exposing the campus security endpoints.
//!
//! Handlers depend only on the driving ports bundled in [`state::HttpState`];
//! wiring concrete adapters happens in the server binary.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod incidents;
pub mod redirect;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod upload;
pub mod uploads;
pub mod users;

pub use crate::domain::ApiResult;

use actix_web::web;

/// Register every page and API handler on `cfg`.
///
/// Callers supply the [`state::HttpState`] and
/// [`health::HealthState`] app data and the session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::index)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::logout)
        .service(dashboard::dashboard)
        .service(incidents::incident_form)
        .service(incidents::create_incident)
        .service(incidents::list_incidents)
        .service(users::create_user)
        .service(users::list_users)
        .service(uploads::get_upload)
        .service(health::ready)
        .service(health::live);
}
