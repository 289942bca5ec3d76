//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test};

use crate::domain::ports::{
    MockDashboardQuery, MockIncidentIntake, MockLoginService, MockMediaStore, MockSessionManager,
    MockUserDirectory,
};
use crate::domain::{Error, ImagePolicy, Role, SessionSnapshot, SessionToken, UserId, UserType};

use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts};

/// Session cookie name used by the server and by these helpers.
pub const SESSION_COOKIE: &str = "session";

/// Token written by [`sign_in_route`].
pub const TEST_TOKEN: &str = "test-session-token";

/// Per-file limit used by handler tests.
pub const TEST_UPLOAD_LIMIT: usize = 64;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh encryption key per invocation.
/// - Uses private (encrypted) cookies like the server does.
/// - Disables the `Secure` flag for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Mock for every driving port, with no expectations set.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub sessions: MockSessionManager,
    pub incidents: MockIncidentIntake,
    pub users: MockUserDirectory,
    pub dashboard: MockDashboardQuery,
    pub media: MockMediaStore,
}

impl TestPorts {
    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                sessions: Arc::new(self.sessions),
                incidents: Arc::new(self.incidents),
                users: Arc::new(self.users),
                dashboard: Arc::new(self.dashboard),
                media: Arc::new(self.media),
            },
            ImagePolicy::new(TEST_UPLOAD_LIMIT),
        )
    }

    /// Make every token resolve to a snapshot with `role`.
    pub fn signed_in_as(mut self, role: Role) -> Self {
        self.sessions
            .expect_resolve()
            .returning(move |_| Ok(Some(snapshot(role))));
        self
    }
}

/// Session snapshot for a fixture account holding `role`.
pub fn snapshot(role: Role) -> SessionSnapshot {
    let (username, user_type) = match role {
        Role::Admin => ("admin-account", UserType::Admin),
        Role::User => ("user-account", UserType::Staff),
    };
    SessionSnapshot {
        user_id: UserId::random(),
        username: username.to_owned(),
        role,
        user_type,
        name: "Fixture Account".into(),
        student_id: None,
        department: "Security".into(),
    }
}

/// Handler that stores [`TEST_TOKEN`] in the session cookie.
pub async fn sign_in_route(session: SessionContext) -> Result<HttpResponse, Error> {
    session.persist_token(&SessionToken::new(TEST_TOKEN))?;
    Ok(HttpResponse::Ok().finish())
}

/// Call `/sign-in` (mounted on [`sign_in_route`]) and return the cookie.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = test::call_service(app, test::TestRequest::get().uri("/sign-in").to_request()).await;
    session_cookie(&res).expect("session cookie set")
}
