use std::fmt::Debug;

use chrono::Duration;
use log::*;

use crate::{
    db_types::{AuthToken, NewUser, User},
    helpers::{hash_password, verify_password},
    traits::{AuthApiError, AuthManagement},
};

/// `AuthApi` manages user registration, login and bearer token validation.
///
/// Passwords are salted and hashed before they reach the backend, and accounts and tokens are durable rows, so a
/// restart neither forgets users nor revives sessions past their expiry.
pub struct AuthApi<B> {
    db: B,
    token_lifetime: Duration,
}

impl<B> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi")
    }
}

impl<B> AuthApi<B> {
    pub fn new(db: B, token_lifetime: Duration) -> Self {
        Self { db, token_lifetime }
    }
}

impl<B> AuthApi<B>
where B: AuthManagement
{
    /// Registers a new user account and signs them in, returning the account and a freshly issued token. The
    /// email must not be in use yet.
    pub async fn register(&self, user: NewUser) -> Result<(User, AuthToken), AuthApiError> {
        let hash = hash_password(&user.password);
        let user = self.db.insert_user(&user, &hash).await?;
        let token = AuthToken::issue(&user.id, self.token_lifetime);
        self.db.insert_auth_token(&token).await?;
        debug!("🔐️ New user registered: {}", user.email);
        Ok((user, token))
    }

    /// Signs a user in. An unknown email and a wrong password are deliberately indistinguishable to the caller.
    ///
    /// Each login also sweeps out expired tokens. The purge is best-effort; a purge failure is logged and the
    /// login proceeds.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, AuthToken), AuthApiError> {
        if let Err(e) = self.db.purge_expired_tokens().await {
            warn!("🔐️ Could not purge expired tokens. {e}");
        }
        let user = self.db.fetch_user_by_email(email).await?.ok_or(AuthApiError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash) {
            debug!("🔐️ Failed login attempt for {email}");
            return Err(AuthApiError::InvalidCredentials);
        }
        let token = AuthToken::issue(&user.id, self.token_lifetime);
        self.db.insert_auth_token(&token).await?;
        debug!("🔐️ {email} logged in");
        Ok((user, token))
    }

    /// Looks up a bearer token, returning it only while it has not expired.
    pub async fn validate_token(&self, token: &str) -> Result<AuthToken, AuthApiError> {
        let found = self.db.fetch_auth_token(token).await?.ok_or(AuthApiError::TokenNotFound)?;
        if found.is_expired() {
            return Err(AuthApiError::TokenExpired);
        }
        Ok(found)
    }
}
