//! Registration and lookup of user accounts.

use crate::error::ErrorKind;
use crate::store::{Store, StoreError};
use crate::user::domain::{User, UserDomainError, UserId, UserProfile, Username};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// The username is already registered.
    #[error("username {0} is already taken")]
    DuplicateUsername(Username),
    /// No user with the identifier exists.
    #[error("user {0} not found")]
    NotFound(UserId),
    /// No user with the username exists.
    #[error("user {0} not found")]
    UnknownUsername(String),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UserServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::DuplicateUsername(_) => ErrorKind::Conflict,
            Self::NotFound(_) | Self::UnknownUsername(_) => ErrorKind::NotFound,
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User account service.
#[derive(Clone)]
pub struct UserService<S, C>
where
    S: Store,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> UserService<S, C>
where
    S: Store,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] for invalid fields and
    /// [`UserServiceError::DuplicateUsername`] when the username is taken.
    pub async fn register(&self, request: RegisterUserRequest) -> UserServiceResult<User> {
        let profile = UserProfile::new(
            request.username,
            request.email,
            request.first_name,
            request.last_name,
        )?;
        let user = User::register(profile, &*self.clock);
        let created = self
            .store
            .transaction(move |tx| {
                if tx.find_user_by_username(user.username())?.is_some() {
                    return Err(UserServiceError::DuplicateUsername(user.username().clone()));
                }
                tx.insert_user(&user)?;
                Ok(user)
            })
            .await?;
        tracing::info!(user_id = %created.id(), username = %created.username(), "registered user");
        Ok(created)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when no such user exists.
    pub async fn find_by_id(&self, id: UserId) -> UserServiceResult<User> {
        self.store
            .transaction(move |tx| tx.find_user(id)?.ok_or(UserServiceError::NotFound(id)))
            .await
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::UnknownUsername`] when no such user exists
    /// and [`UserServiceError::Domain`] when `username` is malformed.
    pub async fn find_by_username(&self, username: &str) -> UserServiceResult<User> {
        let parsed = Username::new(username)?;
        self.store
            .transaction(move |tx| {
                tx.find_user_by_username(&parsed)?
                    .ok_or_else(|| UserServiceError::UnknownUsername(parsed.as_str().to_owned()))
            })
            .await
    }
}
