//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainResult;
use crate::password::Password;

/// Marketplace member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Opaque hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// User creation input. The password must already be hashed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "Password hash must be 1-255 characters"))]
    pub password_hash: String,

    /// Starting rating; defaults to zero when absent
    pub rating: Option<f64>,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            rating: None,
        }
    }

    /// Build the input from a plain text password, hashing it with argon2.
    pub fn with_password(
        username: impl Into<String>,
        email: impl Into<String>,
        plain_text: &str,
    ) -> DomainResult<Self> {
        let password = Password::new(plain_text)?;
        Ok(Self::new(username, email, password.as_str()))
    }
}

impl User {
    /// Check a plain text password against the stored hash.
    pub fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.clone()).verify(plain_text)
    }
}

/// Partial user update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserChanges {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Password hash must be 1-255 characters"))]
    pub password_hash: Option<String>,

    pub rating: Option<f64>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.rating.is_none()
    }
}
