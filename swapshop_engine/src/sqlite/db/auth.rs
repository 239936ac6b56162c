use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::{
    db_types::{AuthToken, NewUser, User},
    traits::AuthApiError,
};

/// Creates a new user account row. A UNIQUE violation on the email column is reported as
/// [`AuthApiError::EmailAlreadyRegistered`]; everything else propagates as a database error.
pub async fn insert_user(
    user: &NewUser,
    password_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<User, AuthApiError> {
    let result = sqlx::query_as(
        r#"
            INSERT INTO users (id, nombre, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nombre, email, password_hash, created_at;
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&user.nombre)
    .bind(&user.email)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(conn)
    .await;
    match result {
        Ok(user) => Ok(user),
        Err(e) if e.as_database_error().map(|de| de.is_unique_violation()).unwrap_or(false) => {
            Err(AuthApiError::EmailAlreadyRegistered)
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, AuthApiError> {
    let user = sqlx::query_as("SELECT id, nombre, email, password_hash, created_at FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(conn)
        .await?;
    Ok(user)
}

pub async fn insert_auth_token(token: &AuthToken, conn: &mut SqliteConnection) -> Result<(), AuthApiError> {
    sqlx::query("INSERT INTO auth_tokens (token, user_id, expires_at, created_at) VALUES ($1, $2, $3, $4)")
        .bind(&token.token)
        .bind(&token.user_id)
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn fetch_auth_token(token: &str, conn: &mut SqliteConnection) -> Result<Option<AuthToken>, AuthApiError> {
    let token = sqlx::query_as("SELECT token, user_id, expires_at, created_at FROM auth_tokens WHERE token = $1")
        .bind(token)
        .fetch_optional(conn)
        .await?;
    Ok(token)
}

/// Removes all tokens whose expiry lies in the past, returning the number of rows deleted.
pub(crate) async fn purge_expired_tokens(conn: &mut SqliteConnection) -> Result<u64, AuthApiError> {
    let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at <= $1").bind(Utc::now()).execute(conn).await?;
    let purged = result.rows_affected();
    if purged > 0 {
        debug!("🔐️ Purged {purged} expired auth tokens");
    }
    Ok(purged)
}
