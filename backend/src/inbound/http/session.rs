//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie only ever carries an opaque token. [`AuthenticatedSession`]
//! turns that token back into a [`SessionSnapshot`] through the
//! [`SessionManager`](crate::domain::ports::SessionManager) port and
//! redirects to the login page when there is no live session.

use actix_session::Session;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, SessionSnapshot, SessionToken};

use super::redirect::{LOGIN_PATH, see_other};
use super::state::HttpState;

pub(crate) const SESSION_TOKEN_KEY: &str = "token";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the session token in the cookie, rotating the cookie value.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_TOKEN_KEY, token.as_str())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token carried by the cookie, if present.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        self.0
            .get::<String>(SESSION_TOKEN_KEY)
            .map(|token| token.map(SessionToken::new))
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Drop everything in the cookie and ask the browser to delete it.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// A request backed by a live server-side session.
///
/// Extracting this type is the authentication check: requests without a
/// live session never reach the handler and are answered with
/// `303 See Other` to the login page instead.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    token: SessionToken,
    snapshot: SessionSnapshot,
}

impl AuthenticatedSession {
    /// Identity captured at login.
    #[must_use]
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Opaque token identifying the server-side session.
    #[must_use]
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Require the admin role or fail with `403 Forbidden`.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.snapshot.is_admin() {
            Ok(())
        } else {
            Err(Error::forbidden("admin access required"))
        }
    }
}

fn redirect_to_login() -> actix_web::Error {
    InternalError::from_response("login required", see_other(LOGIN_PATH)).into()
}

impl FromRequest for AuthenticatedSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = SessionContext::new(session.await?);
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let Some(token) = session.token()? else {
                return Err(redirect_to_login());
            };
            match state.sessions.resolve(&token).await? {
                Some(snapshot) => Ok(Self { token, snapshot }),
                None => {
                    debug!("session cookie refers to an expired or revoked session");
                    session.purge();
                    Err(redirect_to_login())
                }
            }
        })
    }
}
