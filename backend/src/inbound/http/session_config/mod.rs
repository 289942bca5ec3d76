//! Session cookie configuration read from the environment.
//!
//! Debug builds tolerate missing or malformed toggles and fall back to
//! development defaults with a warning. Release builds refuse to start
//! unless every toggle is present and valid and a real key file exists.
//!
//! | Variable                          | Meaning                             |
//! |-----------------------------------|-------------------------------------|
//! | `CAMPUS_SESSION_KEY_FILE`         | Path to at least 64 bytes of key    |
//! | `CAMPUS_SESSION_COOKIE_SECURE`    | Mark the cookie `Secure`            |
//! | `CAMPUS_SESSION_SAMESITE`         | `Strict`, `Lax`, or `None`          |
//! | `CAMPUS_SESSION_ALLOW_EPHEMERAL`  | Permit a generated key (debug only) |

pub mod fingerprint;
mod parsing;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

use parsing::{Toggle, same_site_from, tolerate};

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/campus_session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "CAMPUS_SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "CAMPUS_SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "CAMPUS_SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "CAMPUS_SESSION_ALLOW_EPHEMERAL";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use campus_security::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Cookie settings for the session middleware.
pub struct SessionSettings {
    /// Encryption and signing key for private session cookies.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("CAMPUS_SESSION_SAMESITE=None requires CAMPUS_SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Release builds must not run on a generated key.
    #[error("CAMPUS_SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use campus_security::inbound::http::session_config::{
///     session_settings_from_env, BuildMode,
/// };
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "CAMPUS_SESSION_COOKIE_SECURE" => Some("0".to_owned()),
///     "CAMPUS_SESSION_SAMESITE" => Some("Lax".to_owned()),
///     "CAMPUS_SESSION_KEY_FILE" => Some("/nonexistent/key".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).unwrap();
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = Toggle::new(COOKIE_SECURE_ENV, true).read(env, mode, |flag, _| Ok(flag))?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = Toggle::new(ALLOW_EPHEMERAL_ENV, false).read(env, mode, |flag, mode| {
        if flag && !mode.is_debug() {
            Err(SessionConfigError::EphemeralNotAllowed)
        } else {
            Ok(flag)
        }
    })?;
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    match env.string(SAMESITE_ENV) {
        Some(value) => same_site_from(&value, mode, cookie_secure, default_same_site),
        None => tolerate(
            mode,
            default_same_site,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("{SAMESITE_ENV} not set; using default"),
        ),
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only); sessions end on restart"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}

#[cfg(test)]
mod tests;
