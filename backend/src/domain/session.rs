//! Server-held session state.
//!
//! A [`SessionSnapshot`] is copied from the [`User`] at login and never
//! revalidated until the next login. The browser only ever sees the opaque
//! [`SessionToken`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Role, User, UserId, UserType};

/// Identity fields captured at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub user_type: UserType,
    pub name: String,
    pub student_id: Option<String>,
    pub department: String,
}

impl SessionSnapshot {
    /// Whether the session carries the admin role. `user_type` is ignored.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for SessionSnapshot {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            user_type: user.user_type,
            name: user.name.clone(),
            student_id: user.student_id.clone(),
            department: user.department.clone(),
        }
    }
}

/// Opaque session identifier stored in the session cookie.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string read back from the cookie.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Tokens are bearer secrets; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn debug_output_hides_token() {
        let token = SessionToken::new("deadbeef");
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
    }

    #[rstest]
    #[case(Role::Admin, UserType::Staff, true)]
    #[case(Role::User, UserType::Admin, false)]
    fn admin_check_uses_role_only(
        #[case] role: Role,
        #[case] user_type: UserType,
        #[case] expected: bool,
    ) {
        let snapshot = SessionSnapshot {
            user_id: UserId::random(),
            username: "someone".into(),
            role,
            user_type,
            name: "Some One".into(),
            student_id: None,
            department: "Physics".into(),
        };
        assert_eq!(snapshot.is_admin(), expected);
    }
}
