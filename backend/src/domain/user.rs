//! User records and the validated input used to create them.
//!
//! `User` mirrors the stored JSON document (camelCase keys, password hash
//! under `password`). Anything leaving the process over HTTP goes through
//! [`UserSummary`], which has no password field at all.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authorisation role. Only `admin` unlocks user management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator with access to user management.
    Admin,
    /// Regular authenticated user.
    User,
}

impl Role {
    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(UserValidationError::InvalidRole(other.to_owned())),
        }
    }
}

/// Campus population category, selected on the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Platform administrator.
    Admin,
    /// Enrolled student; the only category that carries a student id.
    Student,
    /// Member of staff.
    Staff,
}

impl UserType {
    /// Every selectable user type, in form order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Student, Self::Staff];

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
            Self::Staff => "staff",
        }
    }
}

impl FromStr for UserType {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            "staff" => Ok(Self::Staff),
            other => Err(UserValidationError::InvalidUserType(other.to_owned())),
        }
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `username` is unique across the users collection.
/// - `student_id` is `None` unless `user_type` is [`UserType::Student`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// PHC-format salted hash; the key stays `password` for file compatibility.
    #[serde(rename = "password")]
    pub password_hash: String,
    pub role: Role,
    pub user_type: UserType,
    #[serde(default)]
    pub name: String,
    /// Older records omit blank form fields entirely.
    #[serde(default)]
    pub email: String,
    pub student_id: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub registration_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Keys this version does not model, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Whether this record belongs to the student population.
    #[must_use]
    pub fn is_student(&self) -> bool {
        self.user_type == UserType::Student
    }
}

/// Public projection of a [`User`] without credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub user_type: UserType,
    pub name: String,
    pub email: String,
    pub student_id: Option<String>,
    pub department: String,
    pub profile_photo: Option<String>,
    pub registration_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            user_type: user.user_type,
            name: user.name.clone(),
            email: user.email.clone(),
            student_id: user.student_id.clone(),
            department: user.department.clone(),
            profile_photo: user.profile_photo.clone(),
            registration_photo: user.registration_photo.clone(),
            created_at: user.created_at,
        }
    }
}

/// Validation errors returned by [`NewUser::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    EmptyPassword,
    EmptyName,
    InvalidRole(String),
    InvalidUserType(String),
}

impl UserValidationError {
    /// Form field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
            Self::EmptyName => "name",
            Self::InvalidRole(_) => "role",
            Self::InvalidUserType(_) => "userType",
        }
    }

    /// Stable machine-readable detail code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::EmptyPassword => "empty_password",
            Self::EmptyName => "empty_name",
            Self::InvalidRole(_) => "invalid_role",
            Self::InvalidUserType(_) => "invalid_user_type",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidRole(value) => write!(f, "role must be admin or user, got '{value}'"),
            Self::InvalidUserType(value) => {
                write!(f, "user type must be admin, student, or staff, got '{value}'")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Raw text fields of a user-creation form.
#[derive(Debug, Clone, Default)]
pub struct NewUserFields {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub user_type: String,
    pub student_id: Option<String>,
    pub department: String,
}

/// Validated input for creating a user.
///
/// ## Invariants
/// - `username`, `password`, and `name` are non-empty.
/// - `student_id` is `None` unless `user_type` is [`UserType::Student`]; for
///   students the supplied value is kept verbatim, empty string included.
#[derive(Debug, Clone)]
pub struct NewUser {
    username: String,
    password: Zeroizing<String>,
    name: String,
    email: String,
    role: Role,
    user_type: UserType,
    student_id: Option<String>,
    department: String,
}

impl NewUser {
    /// Validate raw form fields.
    ///
    /// # Examples
    /// ```
    /// use campus_security::domain::{NewUser, NewUserFields, UserType};
    ///
    /// let user = NewUser::try_from_parts(NewUserFields {
    ///     username: "staff002".into(),
    ///     password: "pw".into(),
    ///     name: "Grace Hopper".into(),
    ///     role: "user".into(),
    ///     user_type: "staff".into(),
    ///     student_id: Some("ignored".into()),
    ///     ..NewUserFields::default()
    /// })
    /// .unwrap();
    /// assert_eq!(user.user_type(), UserType::Staff);
    /// assert_eq!(user.student_id(), None);
    /// ```
    pub fn try_from_parts(fields: NewUserFields) -> Result<Self, UserValidationError> {
        let NewUserFields {
            username,
            password,
            name,
            email,
            role,
            user_type,
            student_id,
            department,
        } = fields;

        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let role = role.parse::<Role>()?;
        let user_type = user_type.parse::<UserType>()?;
        let student_id = match user_type {
            UserType::Student => student_id,
            UserType::Admin | UserType::Staff => None,
        };

        Ok(Self {
            username,
            password: Zeroizing::new(password),
            name,
            email,
            role,
            user_type,
            student_id,
            department,
        })
    }

    /// Requested username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Plaintext password awaiting hashing.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Requested user type.
    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Student id after applying the student-only rule.
    #[must_use]
    pub fn student_id(&self) -> Option<&str> {
        self.student_id.as_deref()
    }

    /// Build the stored record once the password hash and photos are known.
    #[must_use]
    pub fn into_user(
        self,
        id: UserId,
        password_hash: String,
        photos: StoredPhotos,
        created_at: DateTime<Utc>,
    ) -> User {
        User {
            id,
            username: self.username,
            password_hash,
            role: self.role,
            user_type: self.user_type,
            name: self.name,
            email: self.email,
            student_id: self.student_id,
            department: self.department,
            profile_photo: photos.profile,
            registration_photo: photos.registration,
            created_at,
            extra: Map::new(),
        }
    }
}

/// Media references recorded for a new user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredPhotos {
    pub profile: Option<String>,
    pub registration: Option<String>,
}
