//! Campus security backend library modules.
//!
//! The crate follows a ports-and-adapters layout: `domain` owns the records,
//! validation rules, and services; `inbound::http` exposes them over Actix
//! Web; `outbound` implements the ports over JSON files, the upload
//! directory, Argon2, and an in-memory session registry.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
