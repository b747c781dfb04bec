//! User account aggregate.

use super::{EmailAddress, UserDomainError, UserId, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Column width of `first_name` and `last_name`.
const MAX_NAME_LENGTH: usize = 150;

/// Profile fields supplied when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    username: Username,
    email: EmailAddress,
    first_name: String,
    last_name: String,
}

impl UserProfile {
    /// Validates raw profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError`] when the username or email is invalid or
    /// either name is blank or longer than 150 characters.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, UserDomainError> {
        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            first_name: required_name(first_name.into(), "first name")?,
            last_name: required_name(last_name.into(), "last name")?,
        })
    }

    /// Returns the validated username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

fn required_name(value: String, field: &'static str) -> Result<String, UserDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserDomainError::EmptyName(field));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(UserDomainError::NameTooLong(field));
    }
    Ok(trimmed.to_owned())
}

/// A registered account able to send and receive messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: Username,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted first name.
    pub first_name: String,
    /// Persisted last name.
    pub last_name: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user from a validated profile.
    #[must_use]
    pub fn register(profile: UserProfile, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            username: profile.username,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns `"first last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when email, first or last name contains `needle`,
    /// ignoring case. An empty needle matches every user.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let lowered = needle.trim().to_lowercase();
        [self.email.as_str(), &self.first_name, &self.last_name]
            .iter()
            .any(|field| field.to_lowercase().contains(&lowered))
    }
}
