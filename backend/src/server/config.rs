//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};

use campus_security::inbound::http::session_config::SessionSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: (String, u16),
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: (String, u16)) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Return the address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.bind_addr.0.as_str(), self.bind_addr.1)
    }
}
