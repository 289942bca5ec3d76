//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` must not be empty and is matched exactly (no trimming).
/// - `password` must not be empty.
/// - `user_type` is kept as submitted; an unknown value simply never matches
///   a stored user.
///
/// # Examples
/// ```
/// use campus_security::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "admin123", "admin").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.user_type(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
    user_type: String,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        user_type: &str,
    ) -> Result<Self, LoginValidationError> {
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            user_type: user_type.to_owned(),
        })
    }

    /// Username string suitable for user lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// User type selected on the login form.
    #[must_use]
    pub fn user_type(&self) -> &str {
        self.user_type.as_str()
    }
}
