//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user newtypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must not contain surrounding whitespace")]
    InvalidId,
    #[error("login must not be empty")]
    EmptyLogin,
}

/// Opaque user identifier assigned by the store.
///
/// Any non-blank string is accepted so identifiers produced by other stores
/// (for example pinned seed identifiers) round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh store identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login name; never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    /// Validate and construct a [`Login`].
    pub fn new(login: impl Into<String>) -> Result<Self, UserValidationError> {
        let login = login.into();
        if login.trim().is_empty() {
            return Err(UserValidationError::EmptyLogin);
        }
        Ok(Self(login))
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Login> for String {
    fn from(value: Login) -> Self {
        value.0
    }
}

impl TryFrom<String> for Login {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Age(u32);

impl Age {
    #[must_use]
    pub const fn new(years: u32) -> Self {
        Self(years)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Age {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Stored user document.
///
/// ## Invariants
/// - `id` is `None` until the store persists the user for the first time.
/// - `login` is never blank.
///
/// # Examples
/// ```
/// use user_service::domain::{Age, Login, User, UserId};
///
/// let user = User::new(Login::new("ala").expect("valid login"), Age::new(18));
/// assert!(user.id().is_none());
///
/// let stored = user.with_id(UserId::new("abc123").expect("valid id"));
/// assert_eq!(stored.id().map(AsRef::as_ref), Some("abc123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: Option<UserId>,
    login: Login,
    age: Age,
}

impl User {
    /// Build a user that has not been persisted yet.
    #[must_use]
    pub fn new(login: Login, age: Age) -> Self {
        Self {
            id: None,
            login,
            age,
        }
    }

    /// Fallible constructor from raw parts, as read back from a store.
    pub fn try_from_parts(
        id: Option<String>,
        login: impl Into<String>,
        age: u32,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            id: id.map(UserId::new).transpose()?,
            login: Login::new(login)?,
            age: Age::new(age),
        })
    }

    /// Return the same user bound to `id`.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Full replacement of `login` and `age`, keeping this user's identifier.
    #[must_use]
    pub fn replaced_by(&self, login: Login, age: Age) -> Self {
        Self {
            id: self.id.clone(),
            login,
            age,
        }
    }

    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    pub fn age(&self) -> Age {
        self.age
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "User({id}, {}, {})", self.login, self.age.0),
            None => write!(f, "User(<new>, {}, {})", self.login, self.age.0),
        }
    }
}
