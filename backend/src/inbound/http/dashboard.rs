//! Dashboard handler.
//!
//! ```text
//! GET /dashboard
//! ```

use actix_web::{get, web};

use crate::domain::{ApiResult, DashboardSummary};

use super::schemas::{DashboardSummarySchema, ErrorSchema};
use super::session::AuthenticatedSession;
use super::state::HttpState;

/// Counts and the five most recent incidents for the signed-in user.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummarySchema),
        (status = 303, description = "No live session; redirect to /login", headers(("Location" = String))),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: AuthenticatedSession,
) -> ApiResult<web::Json<DashboardSummary>> {
    let summary = state.dashboard.summary(session.snapshot()).await?;
    Ok(web::Json(summary))
}
