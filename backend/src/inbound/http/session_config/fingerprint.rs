//! Session key fingerprinting for operational visibility.
//!
//! A truncated SHA-256 of the session signing key is logged at startup so
//! operators can tell which key file a running server picked up without the
//! key itself ever reaching the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Generate a truncated SHA-256 fingerprint of the key's signing material.
///
/// Returns the first 8 bytes of the SHA-256 hash as 16 lowercase hex
/// characters.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use campus_security::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let key = Key::generate();
/// let fp = key_fingerprint(&key);
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fingerprint_is_stable_for_a_key() {
        let key = Key::derive_from(&[b'a'; 64]);
        assert_eq!(key_fingerprint(&key), key_fingerprint(&key));
    }

    #[rstest]
    fn fingerprint_is_short_lowercase_hex() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[rstest]
    fn different_keys_produce_different_fingerprints() {
        let first = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        let second = key_fingerprint(&Key::derive_from(&[b'b'; 64]));
        assert_ne!(first, second);
    }
}
