//! Readers for the individual `CAMPUS_SESSION_*` toggles.
//!
//! Each reader yields the configured value. When the variable is absent or
//! unreadable, debug builds log and fall back while release builds fail.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, COOKIE_SECURE_ENV, SAMESITE_ENV, SessionConfigError};

const ACCEPTED_FLAGS: &str = "1|0|true|false|yes|no|y|n";
const ACCEPTED_SAME_SITE: &str = "Strict|Lax|None";

/// A boolean `CAMPUS_SESSION_*` variable and the value debug builds assume.
#[derive(Clone, Copy, Debug)]
pub(super) struct Toggle {
    var: &'static str,
    debug_default: bool,
}

impl Toggle {
    pub(super) const fn new(var: &'static str, debug_default: bool) -> Self {
        Self { var, debug_default }
    }

    const fn fallback_word(self) -> &'static str {
        if self.debug_default { "on" } else { "off" }
    }

    /// Read the toggle; `admit` may still refuse a well-formed value.
    pub(super) fn read<E, A>(
        self,
        env: &E,
        mode: BuildMode,
        admit: A,
    ) -> Result<bool, SessionConfigError>
    where
        E: Env,
        A: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
    {
        let Some(raw) = env.string(self.var) else {
            return tolerate(
                mode,
                self.debug_default,
                SessionConfigError::MissingEnv { name: self.var },
                || warn!(var = self.var, fallback = self.fallback_word(), "session toggle unset"),
            );
        };
        match flag_from(&raw) {
            Some(flag) => admit(flag, mode),
            None => tolerate(
                mode,
                self.debug_default,
                SessionConfigError::InvalidEnv {
                    name: self.var,
                    value: raw.clone(),
                    expected: ACCEPTED_FLAGS,
                },
                || {
                    warn!(
                        var = self.var,
                        value = %raw,
                        fallback = self.fallback_word(),
                        "session toggle unreadable"
                    );
                },
            ),
        }
    }
}

/// Debug builds run `log` and keep `fallback`; release builds return `error`.
pub(super) fn tolerate<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    log: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if !mode.is_debug() {
        return Err(error);
    }
    log();
    Ok(fallback)
}

/// Interpret a `CAMPUS_SESSION_SAMESITE` value, case-insensitively.
pub(super) fn same_site_from(
    raw: &str,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    if raw.eq_ignore_ascii_case("strict") {
        return Ok(SameSite::Strict);
    }
    if raw.eq_ignore_ascii_case("lax") {
        return Ok(SameSite::Lax);
    }
    if raw.eq_ignore_ascii_case("none") {
        return cross_site_policy(mode, cookie_secure);
    }
    tolerate(
        mode,
        fallback,
        SessionConfigError::InvalidEnv {
            name: SAMESITE_ENV,
            value: raw.to_owned(),
            expected: ACCEPTED_SAME_SITE,
        },
        || warn!(var = SAMESITE_ENV, value = %raw, fallback = ?fallback, "unknown SameSite policy"),
    )
}

// Browsers drop `SameSite=None` cookies that are not also `Secure`.
fn cross_site_policy(mode: BuildMode, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
    if cookie_secure {
        return Ok(SameSite::None);
    }
    tolerate(
        mode,
        SameSite::None,
        SessionConfigError::InsecureSameSiteNone,
        || warn!("{SAMESITE_ENV}=None while {COOKIE_SECURE_ENV} is off; the cookie may be ignored"),
    )
}

fn flag_from(raw: &str) -> Option<bool> {
    const ON: [&str; 4] = ["1", "true", "yes", "y"];
    const OFF: [&str; 4] = ["0", "false", "no", "n"];
    if ON.iter().any(|word| raw.eq_ignore_ascii_case(word)) {
        Some(true)
    } else if OFF.iter().any(|word| raw.eq_ignore_ascii_case(word)) {
        Some(false)
    } else {
        None
    }
}
