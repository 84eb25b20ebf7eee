//! User entity and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_email, validate_user_id, validate_user_name, UserValidationError};

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a UserId from an existing value
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    /// Unique across all users
    email: String,
    /// Never exposed in serialized output
    #[serde(skip_serializing, default)]
    hashed_password: String,
    #[serde(default)]
    score: i64,
}

impl User {
    /// Create a new user with a generated ID
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Self::with_id(UserId::generate(), name, email, hashed_password)
    }

    /// Create a user with a known ID
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let email = email.into();
        validate_user_name(&name)?;
        validate_email(&email)?;

        Ok(Self {
            id,
            name,
            email,
            hashed_password: hashed_password.into(),
            score: 0,
        })
    }

    /// Set the score (builder pattern)
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn hashed_password(&self) -> &str {
        &self.hashed_password
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}
