//! Health endpoints: liveness and readiness probes for orchestration.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Shared readiness and liveness flags.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. 200 once the data directory is initialised, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. 200 while the process is marked alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn readiness_flips_after_mark_ready() {
        let state = web::Data::new(HealthState::new());
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(ready)
                .service(live),
        )
        .await;

        let before =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.mark_ready();
        let after =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(after.status(), StatusCode::OK);
        assert_eq!(
            after.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(b"no-store".as_slice())
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_once_unhealthy() {
        let state = web::Data::new(HealthState::new());
        let app = test::init_service(App::new().app_data(state.clone()).service(live)).await;

        let alive =
            test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request())
                .await;
        assert_eq!(alive.status(), StatusCode::OK);

        state.mark_unhealthy();
        let draining =
            test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request())
                .await;
        assert_eq!(draining.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
