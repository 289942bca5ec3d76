//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path()
        .to_str()
        .expect("temporary path should be valid UTF-8")
        .to_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

struct ReleaseVars {
    _key: NamedTempFile,
    vars: HashMap<&'static str, String>,
}

impl ReleaseVars {
    fn set(mut self, name: &'static str, value: &str) -> Self {
        self.vars.insert(name, value.to_owned());
        self
    }

    fn unset(mut self, name: &'static str) -> Self {
        self.vars.remove(name);
        self
    }

    fn settings(&self, mode: BuildMode) -> Result<SessionSettings, SessionConfigError> {
        session_settings_from_env(&mock_env(self.vars.clone()), mode)
    }
}

#[fixture]
fn release_vars() -> ReleaseVars {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let vars = HashMap::from([
        (KEY_FILE_ENV, path_of(&key)),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    ReleaseVars { _key: key, vars }
}

fn expect_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
    match result {
        Ok(_) => panic!("expected session configuration to be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_valid_settings_succeed(release_vars: ReleaseVars) {
    let settings = release_vars
        .settings(BuildMode::Release)
        .expect("expected valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(release_vars: ReleaseVars, #[case] name: &'static str) {
    let err = expect_error(release_vars.unset(name).settings(BuildMode::Release));
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "perhaps")]
fn release_rejects_malformed_toggles(
    release_vars: ReleaseVars,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let err = expect_error(release_vars.set(name, value).settings(BuildMode::Release));
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: bad, .. } if bad == name));
}

#[rstest]
fn release_ephemeral_enabled_is_rejected(release_vars: ReleaseVars) {
    let err = expect_error(
        release_vars
            .set(ALLOW_EPHEMERAL_ENV, "yes")
            .settings(BuildMode::Release),
    );
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_missing_key_file_is_rejected(release_vars: ReleaseVars) {
    let err = expect_error(
        release_vars
            .set(KEY_FILE_ENV, "/nonexistent/campus/session_key")
            .settings(BuildMode::Release),
    );
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_short_key_is_rejected(release_vars: ReleaseVars) {
    let short = key_file(32);
    let err = expect_error(
        release_vars
            .set(KEY_FILE_ENV, &path_of(&short))
            .settings(BuildMode::Release),
    );
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn release_insecure_none_same_site_is_rejected(release_vars: ReleaseVars) {
    let err = expect_error(
        release_vars
            .set(COOKIE_SECURE_ENV, "0")
            .set(SAMESITE_ENV, "None")
            .settings(BuildMode::Release),
    );
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn secure_none_same_site_is_accepted(release_vars: ReleaseVars) {
    let settings = release_vars
        .set(SAMESITE_ENV, "none")
        .settings(BuildMode::Release)
        .expect("SameSite=None with a secure cookie");
    assert_eq!(settings.same_site, SameSite::None);
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let settings = session_settings_from_env(&mock_env(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_invalid_values_fall_back_to_defaults(release_vars: ReleaseVars) {
    let settings = release_vars
        .set(SAMESITE_ENV, "unexpected")
        .set(COOKIE_SECURE_ENV, "maybe")
        .settings(BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn same_key_file_yields_same_fingerprint(release_vars: ReleaseVars) {
    let first = release_vars
        .settings(BuildMode::Release)
        .expect("first load");
    let second = release_vars
        .settings(BuildMode::Release)
        .expect("second load");
    assert_eq!(
        fingerprint::key_fingerprint(&first.key),
        fingerprint::key_fingerprint(&second.key)
    );
}
