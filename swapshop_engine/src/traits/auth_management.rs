use thiserror::Error;

use crate::db_types::{AuthToken, NewUser, User};

/// The `AuthManagement` trait defines behaviour for managing user accounts and their bearer tokens.
///
/// Accounts and tokens are durable rows. Email uniqueness is enforced by the store itself (a UNIQUE constraint),
/// not by a read-then-write in application code, so concurrent registrations cannot slip past the check.
#[allow(async_fn_in_trait)]
pub trait AuthManagement {
    /// Creates a new user account. `password_hash` is the already-salted-and-hashed credential; implementations
    /// never see a raw password. Returns [`AuthApiError::EmailAlreadyRegistered`] if the email is taken.
    async fn insert_user(&self, user: &NewUser, password_hash: &str) -> Result<User, AuthApiError>;

    /// Looks up a user account by email. Returns `None` if no account with this email exists.
    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, AuthApiError>;

    /// Stores a freshly issued bearer token.
    async fn insert_auth_token(&self, token: &AuthToken) -> Result<(), AuthApiError>;

    /// Looks up a bearer token. Expiry is the caller's concern; this returns whatever the store holds.
    async fn fetch_auth_token(&self, token: &str) -> Result<Option<AuthToken>, AuthApiError>;

    /// Deletes every token that has already expired, returning the number of rows removed.
    async fn purge_expired_tokens(&self) -> Result<u64, AuthApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("There is an internal database engine error: {0}")]
    DatabaseError(String),
    #[error("A user with this email address already exists")]
    EmailAlreadyRegistered,
    #[error("The email address or password is incorrect")]
    InvalidCredentials,
    #[error("The authentication token is not valid")]
    TokenNotFound,
    #[error("The authentication token has expired")]
    TokenExpired,
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}
